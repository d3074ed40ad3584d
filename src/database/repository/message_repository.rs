//! Danmaku repository.

use anyhow::Result;
use async_trait::async_trait;
use mongodb::Collection;
use tracing::debug;

use crate::bot::ports::MessageStore;
use crate::database::Database;
use crate::database::models::DanmakuRecord;

/// Repository for accepted danmaku.
pub struct MessageRepository {
    collection: Collection<DanmakuRecord>,
}

impl MessageRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("danmaku"),
        }
    }

    /// Store a danmaku.
    pub async fn insert(&self, record: &DanmakuRecord) -> Result<()> {
        self.collection.insert_one(record).await?;
        debug!("Stored danmaku from {}", record.sender_name);
        Ok(())
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn save_message(&self, message: &str, sender_name: &str) -> Result<()> {
        self.insert(&DanmakuRecord::new(message, sender_name)).await
    }
}
