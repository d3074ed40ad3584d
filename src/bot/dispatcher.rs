//! Event dispatcher.
//!
//! Routes each inbound event by the sender's armed modes:
//! - a trigger phrase arms its mode and replies with instructions
//! - text while danmaku is armed becomes a danmaku
//! - an image while photo is armed becomes a print job
//! - everything else is dropped without a reply

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use super::ports::Services;
use crate::config::DispatchSettings;
use crate::events::{self, InboundEvent, Outcome, Payload};
use crate::i18n::get_text;
use crate::modes::{Mode, ModeResolver};
use crate::utils::preview;

/// Routes inbound events to the mode actions.
///
/// Cloning is cheap; clones share the mode store and the photo slots.
#[derive(Clone)]
pub struct Dispatcher {
    modes: ModeResolver,
    settings: Arc<DispatchSettings>,
    services: Services,
    photo_slots: Arc<Semaphore>,
}

impl Dispatcher {
    pub fn new(modes: ModeResolver, settings: DispatchSettings, services: Services) -> Self {
        let photo_slots = Arc::new(Semaphore::new(settings.max_concurrent_photos.max(1)));
        Self {
            modes,
            settings: Arc::new(settings),
            services,
            photo_slots,
        }
    }

    /// The mode store this dispatcher reads and arms.
    #[cfg(test)]
    pub fn modes(&self) -> &ModeResolver {
        &self.modes
    }

    /// Handle a batch in delivery order.
    ///
    /// A failing event does not stop the rest of the batch.
    pub async fn dispatch(&self, events: Vec<InboundEvent>) -> Vec<Outcome> {
        let mut outcomes = Vec::with_capacity(events.len());
        for event in events {
            outcomes.push(self.handle(event).await);
        }
        outcomes
    }

    /// Handle a single event.
    pub async fn handle(&self, event: InboundEvent) -> Outcome {
        let Some(user_id) = event.user_id.as_deref() else {
            return Outcome::Ignored;
        };

        match &event.payload {
            Payload::Text(text) => self.on_text(user_id, &event.reply_token, text).await,
            Payload::Image { message_id } => {
                self.on_image(user_id, &event.reply_token, message_id).await
            }
            Payload::Other => Outcome::Ignored,
        }
    }

    async fn on_text(&self, user_id: &str, reply_token: &str, text: &str) -> Outcome {
        if self.settings.is_danmaku_trigger(text) {
            return self
                .arm(user_id, reply_token, Mode::Danmaku, "danmaku.armed")
                .await;
        }
        if self.settings.is_photo_trigger(text) {
            return self.arm(user_id, reply_token, Mode::Photo, "photo.armed").await;
        }

        // Armed users may keep sending until the window closes.
        if !self.modes.is_armed(user_id, Mode::Danmaku) {
            debug!("Dropping text from idle user {}: '{}'", user_id, preview(text, 30));
            return Outcome::Ignored;
        }

        let result = events::danmaku::submit(
            &self.services,
            &self.settings.locale,
            user_id,
            reply_token,
            text,
        )
        .await;

        result.unwrap_or_else(|e| {
            error!("Danmaku from {} aborted: {:#}", user_id, e);
            Outcome::Failed
        })
    }

    async fn on_image(&self, user_id: &str, reply_token: &str, message_id: &str) -> Outcome {
        if !self.modes.is_armed(user_id, Mode::Photo) {
            debug!("Dropping image {} from idle user {}", message_id, user_id);
            return Outcome::Ignored;
        }

        let _permit = match self.photo_slots.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                error!("Photo slots closed: {}", e);
                return Outcome::Failed;
            }
        };

        let result = events::photo::submit(
            &self.services,
            &self.settings.locale,
            user_id,
            reply_token,
            message_id,
        )
        .await;

        result.unwrap_or_else(|e| {
            error!("Photo {} from {} aborted: {:#}", message_id, user_id, e);
            Outcome::Failed
        })
    }

    async fn arm(&self, user_id: &str, reply_token: &str, mode: Mode, reply_key: &str) -> Outcome {
        let window = match mode {
            Mode::Danmaku => self.settings.danmaku_window,
            Mode::Photo => self.settings.photo_window,
        };
        self.modes.arm(user_id, mode, window);

        let reply = get_text(&self.settings.locale, reply_key);
        if let Err(e) = self.services.messenger.reply(reply_token, &reply).await {
            warn!("Failed to send {} instructions to {}: {}", mode, user_id, e);
        }

        Outcome::Armed(mode)
    }
}
