//! Print queue repository.
//!
//! Serials come from a counter document bumped atomically, so concurrent
//! uploads never share a number.

use std::path::Path;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use tracing::debug;

use crate::bot::ports::PrintQueue;
use crate::database::Database;
use crate::database::models::{PhotoCounter, PhotoRecord};

/// Counter document id for photo serials.
const PHOTO_SEQUENCE: &str = "photo_serial";

/// Repository for queued photos.
pub struct PhotoRepository {
    collection: Collection<PhotoRecord>,
    counters: Collection<PhotoCounter>,
}

impl PhotoRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("photos"),
            counters: db.collection("counters"),
        }
    }

    /// Allocate the next serial number.
    async fn next_seq(&self) -> Result<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters
            .find_one_and_update(doc! { "_id": PHOTO_SEQUENCE }, doc! { "$inc": { "seq": 1_i64 } })
            .with_options(options)
            .await?
            .ok_or_else(|| anyhow!("photo counter missing after upsert"))?;

        Ok(counter.seq)
    }

    /// Register a stored image and return its record.
    pub async fn create(&self, sender_name: &str, path: &Path) -> Result<PhotoRecord> {
        let seq = self.next_seq().await?;
        let mut record = PhotoRecord::new(seq, sender_name, path);

        let result = self.collection.insert_one(&record).await?;
        record.id = result.inserted_id.as_object_id();

        debug!("Registered photo #{} at {}", record.serial, record.file_path);
        Ok(record)
    }
}

#[async_trait]
impl PrintQueue for PhotoRepository {
    async fn enqueue(&self, sender_name: &str, path: &Path) -> Result<PhotoRecord> {
        self.create(sender_name, path).await
    }
}
