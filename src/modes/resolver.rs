//! Mode resolver backed by the expiring cache.

use std::fmt;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{CacheConfig, ExpiringCache};

/// Something a user can be armed to do.
///
/// The modes are keyed independently, so a user may hold both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Submit short messages for the big screen.
    Danmaku,
    /// Upload a photo for printing.
    Photo,
}

impl Mode {
    /// Tag appended to the user id to build the cache key.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Danmaku => "Danmaku",
            Self::Photo => "Photo",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Answers whether a user is currently armed for a mode.
#[derive(Clone, Debug)]
pub struct ModeResolver {
    flags: ExpiringCache<String, bool>,
}

impl ModeResolver {
    /// Create a resolver with its own isolated flag store.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            flags: ExpiringCache::new("mode_flags", config),
        }
    }

    fn key(user_id: &str, mode: Mode) -> String {
        format!("{}{}", user_id, mode.tag())
    }

    /// Arm `mode` for `user_id` for `window`, restarting any open window.
    pub fn arm(&self, user_id: &str, mode: Mode, window: Duration) {
        self.flags.set(Self::key(user_id, mode), true, window);
        debug!("Armed {} for {} ({:?})", mode, user_id, window);
    }

    /// Check whether `mode` is armed for `user_id`.
    pub fn is_armed(&self, user_id: &str, mode: Mode) -> bool {
        self.flags.get(&Self::key(user_id, mode)).is_some()
    }

    /// Flags currently held, including expired ones not yet reclaimed.
    pub fn entry_count(&self) -> u64 {
        self.flags.entry_count()
    }

    /// Run pending reclamation now.
    #[cfg(test)]
    pub fn sweep(&self) {
        self.flags.sweep();
    }

    /// Start reclaiming expired flags in the background.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        self.flags.spawn_sweeper()
    }
}
