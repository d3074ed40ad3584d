//! Stored danmaku.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A danmaku that passed validation and went to the big screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DanmakuRecord {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Display name of the sender at submission time
    pub sender_name: String,

    pub message: String,

    /// Unix timestamp (seconds)
    pub created_at: i64,
}

impl DanmakuRecord {
    pub fn new(message: &str, sender_name: &str) -> Self {
        Self {
            id: None,
            sender_name: sender_name.to_string(),
            message: message.to_string(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}
