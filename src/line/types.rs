//! Webhook payload models.
//!
//! Only the fields the bot reads are modelled; everything else is ignored.

use serde::Deserialize;

use crate::events::{InboundEvent, Payload};

/// Body of a webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookBody {
    /// Bot user id the events were sent to.
    #[serde(default)]
    pub destination: Option<String>,

    #[serde(default)]
    pub events: Vec<Event>,
}

impl WebhookBody {
    /// Parse a raw (already verified) body.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// A single webhook event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    #[serde(rename_all = "camelCase")]
    Message {
        reply_token: String,
        source: Source,
        message: MessageContent,
    },

    /// Follow, join, postback, ... none of which the bot reacts to.
    #[serde(other)]
    Other,
}

/// Where an event came from.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    #[serde(rename_all = "camelCase")]
    User { user_id: String },

    #[serde(rename_all = "camelCase")]
    Group {
        #[allow(dead_code)]
        group_id: String,
        #[serde(default)]
        user_id: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    Room {
        #[allow(dead_code)]
        room_id: String,
        #[serde(default)]
        user_id: Option<String>,
    },
}

impl Source {
    /// The sending user, when LINE discloses it.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::User { user_id } => Some(user_id),
            Self::Group { user_id, .. } | Self::Room { user_id, .. } => user_id.as_deref(),
        }
    }
}

/// Message payload of a `message` event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text {
        #[allow(dead_code)]
        id: String,
        text: String,
    },
    Image { id: String },
    #[serde(other)]
    Other,
}

impl Event {
    /// Convert into the platform-neutral event the dispatcher consumes.
    pub fn into_inbound(self) -> InboundEvent {
        match self {
            Self::Message {
                reply_token,
                source,
                message,
            } => {
                let payload = match message {
                    MessageContent::Text { text, .. } => Payload::Text(text),
                    MessageContent::Image { id } => Payload::Image { message_id: id },
                    MessageContent::Other => Payload::Other,
                };
                InboundEvent {
                    reply_token,
                    user_id: source.user_id().map(str::to_string),
                    payload,
                }
            }
            Self::Other => InboundEvent {
                reply_token: String::new(),
                user_id: None,
                payload: Payload::Other,
            },
        }
    }
}
