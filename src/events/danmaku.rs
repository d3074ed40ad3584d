//! Danmaku action.
//!
//! Resolves the sender, validates the text, then broadcasts it to the
//! displays and stores it.

use tracing::{debug, info, warn};

use super::Outcome;
use crate::bot::ports::Services;
use crate::i18n::get_text;
use crate::utils::{is_valid_danmaku, preview};

/// Submit `text` from `user_id` as a danmaku.
///
/// External-call failures are returned as errors; the user gets no reply
/// for them.
pub async fn submit(
    services: &Services,
    locale: &str,
    user_id: &str,
    reply_token: &str,
    text: &str,
) -> anyhow::Result<Outcome> {
    let sender_name = services.messenger.display_name(user_id).await?;

    if !is_valid_danmaku(text) {
        debug!("Rejected danmaku from {}: '{}'", user_id, preview(text, 30));
        if let Err(e) = services
            .messenger
            .reply(reply_token, &get_text(locale, "danmaku.rejected"))
            .await
        {
            warn!("Failed to send rejection to {}: {}", user_id, e);
        }
        return Ok(Outcome::DanmakuRejected);
    }

    let receivers = services.broadcaster.broadcast(text);
    services.messages.save_message(text, &sender_name).await?;

    info!(
        "Danmaku from {} ({}) sent to {} displays",
        sender_name, user_id, receivers
    );
    Ok(Outcome::DanmakuAccepted)
}
