//! Cache configuration.

use std::time::Duration;

/// Configuration for an expiring cache instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries, or `None` for no size bound.
    ///
    /// A bounded cache may refuse to admit a fresh entry once full, so stores
    /// whose writes must always be readable leave this unset.
    pub max_capacity: Option<u64>,

    /// How often the background sweeper reclaims expired entries.
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: None,
            sweep_interval: Duration::from_secs(30),
        }
    }
}

impl CacheConfig {
    /// Set the sweep interval (builder pattern).
    #[must_use]
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Config for per-user mode flags.
    /// Size is governed by the windows and the sweeper only.
    pub fn mode_flags() -> Self {
        Self {
            max_capacity: None,
            sweep_interval: Duration::from_secs(15),
        }
    }
}
