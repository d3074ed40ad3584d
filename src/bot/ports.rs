//! Collaborators the dispatcher talks to.
//!
//! Production wiring plugs in the LINE client, the display hub, MongoDB
//! repositories and the image directory; tests plug in recording fakes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::database::PhotoRecord;

/// The messaging platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Reply to the event identified by `reply_token`.
    async fn reply(&self, reply_token: &str, text: &str) -> anyhow::Result<()>;

    /// Resolve a user's display name.
    async fn display_name(&self, user_id: &str) -> anyhow::Result<String>;

    /// Download the binary content attached to a message.
    async fn download_content(&self, message_id: &str) -> anyhow::Result<Vec<u8>>;
}

/// Pushes accepted danmaku to every connected display.
pub trait Broadcaster: Send + Sync {
    /// Returns the number of displays that received the message.
    fn broadcast(&self, text: &str) -> usize;
}

/// Persists accepted danmaku.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn save_message(&self, message: &str, sender_name: &str) -> anyhow::Result<()>;
}

/// Persists uploaded image bytes.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` under `name`, returning the stable file path.
    async fn save_image(&self, name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf>;
}

/// Registers stored images as numbered print jobs.
#[async_trait]
pub trait PrintQueue: Send + Sync {
    async fn enqueue(&self, sender_name: &str, path: &Path) -> anyhow::Result<PhotoRecord>;
}

/// Bundle of collaborators handed to the event actions.
#[derive(Clone)]
pub struct Services {
    pub messenger: Arc<dyn Messenger>,
    pub broadcaster: Arc<dyn Broadcaster>,
    pub messages: Arc<dyn MessageStore>,
    pub images: Arc<dyn ImageStore>,
    pub prints: Arc<dyn PrintQueue>,
}
