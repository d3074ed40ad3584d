//! Recording fakes for the dispatcher's collaborators.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::bail;
use async_trait::async_trait;

use super::ports::{Broadcaster, ImageStore, MessageStore, Messenger, PrintQueue, Services};
use crate::database::PhotoRecord;

/// One observed external call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Reply(String, String),
    Profile(String),
    Download(String),
    Broadcast(String),
    SaveMessage(String, String),
    SaveImage(String),
    Enqueue(String),
}

#[derive(Default)]
struct FakeState {
    calls: Mutex<Vec<Call>>,
    names: Mutex<HashMap<String, String>>,
    serial: AtomicI64,
    fail_replies: AtomicBool,
    fail_profiles: AtomicBool,
    fail_downloads: AtomicBool,
    fail_image_saves: AtomicBool,
}

/// Shared fake implementing every port; clones record into the same log.
#[derive(Clone, Default)]
pub struct Fakes {
    state: Arc<FakeState>,
}

impl Fakes {
    pub fn with_name(self, user_id: &str, name: &str) -> Self {
        self.state
            .names
            .lock()
            .unwrap()
            .insert(user_id.to_string(), name.to_string());
        self
    }

    pub fn failing_replies(self) -> Self {
        self.state.fail_replies.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_profiles(self) -> Self {
        self.state.fail_profiles.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_downloads(self) -> Self {
        self.state.fail_downloads.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_image_saves(self) -> Self {
        self.state.fail_image_saves.store(true, Ordering::SeqCst);
        self
    }

    pub fn services(&self) -> Services {
        Services {
            messenger: Arc::new(self.clone()),
            broadcaster: Arc::new(self.clone()),
            messages: Arc::new(self.clone()),
            images: Arc::new(self.clone()),
            prints: Arc::new(self.clone()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.state.calls.lock().unwrap().clear();
    }

    pub fn broadcasts(&self) -> usize {
        self.count(|c| matches!(c, Call::Broadcast(_)))
    }

    pub fn saved_messages(&self) -> usize {
        self.count(|c| matches!(c, Call::SaveMessage(..)))
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.state.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Messenger for Fakes {
    async fn reply(&self, reply_token: &str, text: &str) -> anyhow::Result<()> {
        self.record(Call::Reply(reply_token.to_string(), text.to_string()));
        if self.state.fail_replies.load(Ordering::SeqCst) {
            bail!("reply token expired");
        }
        Ok(())
    }

    async fn display_name(&self, user_id: &str) -> anyhow::Result<String> {
        self.record(Call::Profile(user_id.to_string()));
        if self.state.fail_profiles.load(Ordering::SeqCst) {
            bail!("profile lookup failed");
        }
        let names = self.state.names.lock().unwrap();
        Ok(names.get(user_id).cloned().unwrap_or_else(|| "Guest".to_string()))
    }

    async fn download_content(&self, message_id: &str) -> anyhow::Result<Vec<u8>> {
        self.record(Call::Download(message_id.to_string()));
        if self.state.fail_downloads.load(Ordering::SeqCst) {
            bail!("content expired");
        }
        Ok(format!("image-{message_id}").into_bytes())
    }
}

impl Broadcaster for Fakes {
    fn broadcast(&self, text: &str) -> usize {
        self.record(Call::Broadcast(text.to_string()));
        1
    }
}

#[async_trait]
impl MessageStore for Fakes {
    async fn save_message(&self, message: &str, sender_name: &str) -> anyhow::Result<()> {
        self.record(Call::SaveMessage(message.to_string(), sender_name.to_string()));
        Ok(())
    }
}

#[async_trait]
impl ImageStore for Fakes {
    async fn save_image(&self, name: &str, _bytes: &[u8]) -> anyhow::Result<PathBuf> {
        self.record(Call::SaveImage(name.to_string()));
        if self.state.fail_image_saves.load(Ordering::SeqCst) {
            bail!("disk full");
        }
        Ok(PathBuf::from(format!("images/{name}.jpg")))
    }
}

#[async_trait]
impl PrintQueue for Fakes {
    async fn enqueue(&self, sender_name: &str, path: &Path) -> anyhow::Result<PhotoRecord> {
        self.record(Call::Enqueue(sender_name.to_string()));
        let seq = self.state.serial.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PhotoRecord::new(seq, sender_name, path))
    }
}
