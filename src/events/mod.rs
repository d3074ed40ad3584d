//! Inbound events and the actions they trigger.
//!
//! - `danmaku` - validate, broadcast and store a danmaku
//! - `photo` - store an uploaded photo and queue it for printing

pub mod danmaku;
pub mod photo;

/// A platform-neutral inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Token for replying to this event (empty when the event has none).
    pub reply_token: String,

    /// Sending user; `None` for group/room events that do not disclose one.
    pub user_id: Option<String>,

    pub payload: Payload,
}

/// What the event carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Image { message_id: String },
    /// Stickers, follows, postbacks and anything else.
    Other,
}

impl InboundEvent {
    /// Text message from a user.
    #[cfg(test)]
    pub fn text(user_id: &str, reply_token: &str, text: &str) -> Self {
        Self {
            reply_token: reply_token.to_string(),
            user_id: Some(user_id.to_string()),
            payload: Payload::Text(text.to_string()),
        }
    }

    /// Image message from a user.
    #[cfg(test)]
    pub fn image(user_id: &str, reply_token: &str, message_id: &str) -> Self {
        Self {
            reply_token: reply_token.to_string(),
            user_id: Some(user_id.to_string()),
            payload: Payload::Image {
                message_id: message_id.to_string(),
            },
        }
    }
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A trigger phrase armed a mode.
    Armed(crate::modes::Mode),
    /// Danmaku broadcast and stored.
    DanmakuAccepted,
    /// Danmaku failed validation; the user was told.
    DanmakuRejected,
    /// Photo stored and queued under `serial`.
    PhotoAccepted { serial: String },
    /// Nothing to do for this event.
    Ignored,
    /// An external call failed; the action was aborted.
    Failed,
}
