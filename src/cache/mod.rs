//! Cache module - expiring key-value storage using Moka.
//!
//! Every entry carries its own time-to-live, so one cache can hold
//! flags with different windows side by side.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let flags: ExpiringCache<String, bool> = ExpiringCache::new("modes", CacheConfig::mode_flags());
//!
//! flags.set("U123Danmaku".to_string(), true, Duration::from_secs(60));
//! let armed = flags.get(&"U123Danmaku".to_string()).is_some();
//! ```

mod config;
mod expiring;

pub use config::CacheConfig;
pub use expiring::ExpiringCache;
