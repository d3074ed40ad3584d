//! Expiring cache with a TTL per entry, built on Moka.

use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::sync::Cache;
use tokio::task::JoinHandle;
use tracing::debug;

use super::CacheConfig;

/// Stored value together with the window it was written with.
#[derive(Debug, Clone)]
struct Timed<V> {
    value: V,
    ttl: Duration,
}

/// Expiry policy: every write (insert or overwrite) restarts the window.
struct PerEntryTtl;

impl<K, V> Expiry<K, Timed<V>> for PerEntryTtl {
    fn expire_after_create(&self, _key: &K, value: &Timed<V>, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &K,
        value: &Timed<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// A concurrent key-value store where each entry carries its own expiry.
///
/// This cache is:
/// - Thread-safe, with per-key linearizable reads and writes
/// - Optionally bounded by `max_capacity`, expired entries are reclaimed by housekeeping
/// - Clone-friendly (cloning is cheap, shares the same underlying cache)
pub struct ExpiringCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Cache<K, Timed<V>>>,
    name: Arc<str>,
    sweep_interval: Duration,
}

// Manual Clone implementation that doesn't require K: Clone
impl<K, V> Clone for ExpiringCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            name: Arc::clone(&self.name),
            sweep_interval: self.sweep_interval,
        }
    }
}

impl<K, V> ExpiringCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a new expiring cache with the given name and config.
    pub fn new(name: impl Into<Arc<str>>, config: CacheConfig) -> Self {
        let mut builder = Cache::builder().expire_after(PerEntryTtl);
        if let Some(capacity) = config.max_capacity {
            builder = builder.max_capacity(capacity);
        }
        let inner: Cache<K, Timed<V>> = builder.build();

        Self {
            inner: Arc::new(inner),
            name: name.into(),
            sweep_interval: config.sweep_interval,
        }
    }

    /// Insert or overwrite `key`, expiring `ttl` from now.
    ///
    /// Last write wins; an overwrite discards the previous expiry.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        self.inner.insert(key, Timed { value, ttl });
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key is absent or its window has passed.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).map(|timed| timed.value)
    }

    /// Get the number of entries in the cache.
    ///
    /// Note: This may lag behind concurrent writes and expiries until
    /// pending housekeeping has run.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Run pending housekeeping, evicting expired entries now.
    pub fn sweep(&self) {
        self.inner.run_pending_tasks();
    }

    /// Spawn a background task that sweeps on the configured interval.
    ///
    /// The task runs until the returned handle is aborted.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(cache.sweep_interval);
            loop {
                ticker.tick().await;
                cache.sweep();
                debug!(cache = %cache.name, entries = cache.entry_count(), "Swept expired entries");
            }
        })
    }
}

impl<K, V> std::fmt::Debug for ExpiringCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("name", &self.name)
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> ExpiringCache<String, bool> {
        ExpiringCache::new("test", CacheConfig::default())
    }

    #[test]
    fn test_get_after_set_returns_value() {
        let cache = cache();
        cache.set("u1Danmaku".to_string(), true, Duration::from_secs(60));

        assert_eq!(cache.get(&"u1Danmaku".to_string()), Some(true));
        assert_eq!(cache.get(&"u2Danmaku".to_string()), None);
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let cache = cache();
        cache.set("k".to_string(), true, Duration::from_millis(50));
        std::thread::sleep(Duration::from_millis(120));

        assert_eq!(cache.get(&"k".to_string()), None);
    }

    #[test]
    fn test_overwrite_resets_window() {
        let cache = cache();
        cache.set("k".to_string(), true, Duration::from_millis(150));
        std::thread::sleep(Duration::from_millis(100));
        cache.set("k".to_string(), true, Duration::from_millis(150));
        std::thread::sleep(Duration::from_millis(100));

        // 200ms after the first write, 100ms after the second.
        assert_eq!(cache.get(&"k".to_string()), Some(true));
    }

    #[test]
    fn test_overwrite_can_shorten_window() {
        let cache = cache();
        cache.set("k".to_string(), true, Duration::from_secs(60));
        cache.set("k".to_string(), false, Duration::from_millis(30));
        std::thread::sleep(Duration::from_millis(100));

        assert_eq!(cache.get(&"k".to_string()), None);
    }

    #[test]
    fn test_sweep_reclaims_expired_entries() {
        let cache = cache();
        for i in 0..10 {
            cache.set(format!("k{i}"), true, Duration::from_millis(20));
        }
        cache.set("keep".to_string(), true, Duration::from_secs(60));
        cache.sweep();
        // Moka's timer wheel only advances in ~1s ticks.
        std::thread::sleep(Duration::from_millis(1300));
        cache.sweep();

        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn test_fresh_flag_readable_with_many_live_entries() {
        let cache: ExpiringCache<String, bool> = ExpiringCache::new("flags", CacheConfig::mode_flags());
        for i in 0..25_000 {
            let key = format!("U{i}Photo");
            cache.set(key.clone(), true, Duration::from_secs(300));
            cache.get(&key);
            cache.get(&key);
        }
        cache.sweep();

        cache.set("U1Danmaku".to_string(), true, Duration::from_secs(60));
        cache.sweep();

        assert_eq!(cache.get(&"U1Danmaku".to_string()), Some(true));
        assert_eq!(cache.entry_count(), 25_001);
    }

    #[test]
    fn test_concurrent_writers_on_distinct_keys() {
        let cache = cache();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for j in 0..50 {
                        cache.set(format!("{i}-{j}"), true, Duration::from_secs(60));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for i in 0..8 {
            for j in 0..50 {
                assert_eq!(cache.get(&format!("{i}-{j}")), Some(true));
            }
        }
    }

    #[tokio::test]
    async fn test_sweeper_task_runs_until_aborted() {
        let cache: ExpiringCache<String, bool> = ExpiringCache::new(
            "sweeper",
            CacheConfig::default().sweep_interval(Duration::from_millis(50)),
        );
        cache.set("k".to_string(), true, Duration::from_millis(10));
        let handle = cache.spawn_sweeper();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.entry_count(), 0);
        handle.abort();
    }
}
