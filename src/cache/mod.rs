//! Time-boxed in-memory cache.
//!
//! Freshness is decided at read time: a stored value never expires on its
//! own, each caller passes the TTL it is willing to tolerate. `None` means
//! "any age" (manual-refresh semantics for metered resources).
//!
//! Keys are few and well known, so there is no eviction beyond `delete`
//! and `clear`.

mod inflight;
mod resource;

pub use inflight::InFlight;
pub use resource::{CachedResource, Lookup};

use dashmap::DashMap;
use std::hash::Hash;
use std::time::Duration;
use tokio::time::Instant;

/// A stored value with the instant it was written
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }

    /// TTL zero tolerates nothing; otherwise fresh while `age <= ttl`.
    pub fn is_fresh(&self, ttl: Option<Duration>) -> bool {
        match ttl {
            None => true,
            Some(ttl) if ttl.is_zero() => false,
            Some(ttl) => self.age() <= ttl,
        }
    }
}

/// Generic key -> value store with read-time TTL
#[derive(Debug)]
pub struct TimedCache<K, V>
where
    K: Eq + Hash,
{
    store: DashMap<K, CacheEntry<V>>,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Value for `key` if present and fresh under `ttl`.
    pub fn get(&self, key: &K, ttl: Option<Duration>) -> Option<V> {
        self.get_entry(key, ttl).map(|entry| entry.value)
    }

    /// Entry for `key` (value plus write instant) if present and fresh.
    pub fn get_entry(&self, key: &K, ttl: Option<Duration>) -> Option<CacheEntry<V>> {
        let hit = self.store.get(key)?;
        if hit.is_fresh(ttl) {
            Some(hit.value().clone())
        } else {
            None
        }
    }

    /// Overwrite `key`, resetting its timestamp.
    pub fn set(&self, key: K, value: V) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn delete(&self, key: &K) {
        self.store.remove(key);
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl<K, V> Default for TimedCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_round_trip_any_ttl() {
        let cache: TimedCache<String, u32> = TimedCache::new();
        cache.set("k".to_string(), 7);

        assert_eq!(cache.get(&"k".to_string(), None), Some(7));
        assert_eq!(cache.get(&"k".to_string(), Some(Duration::from_secs(60))), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_is_always_stale() {
        let cache: TimedCache<&str, u32> = TimedCache::new();
        cache.set("k", 7);
        assert_eq!(cache.get(&"k", Some(Duration::ZERO)), None);
        // The entry itself survives a stale read
        assert_eq!(cache.get(&"k", None), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_evaluated_per_read() {
        let cache: TimedCache<&str, &str> = TimedCache::new();
        cache.set("events", "payload");

        tokio::time::advance(Duration::from_secs(31 * 60)).await;

        // Same entry: stale for a 30 minute reader, fresh for a no-TTL reader
        assert_eq!(cache.get(&"events", Some(Duration::from_secs(30 * 60))), None);
        assert_eq!(cache.get(&"events", None), Some("payload"));
        assert_eq!(
            cache.get(&"events", Some(Duration::from_secs(31 * 60))),
            Some("payload")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_resets_timestamp() {
        let cache: TimedCache<&str, u32> = TimedCache::new();
        cache.set("k", 1);
        tokio::time::advance(Duration::from_secs(120)).await;
        cache.set("k", 2);

        let ttl = Some(Duration::from_secs(60));
        assert_eq!(cache.get(&"k", ttl), Some(2));
        assert_eq!(cache.get_entry(&"k", ttl).unwrap().age(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let cache: TimedCache<&str, u32> = TimedCache::new();
        cache.set("a", 1);
        cache.set("b", 2);

        cache.delete(&"a");
        assert_eq!(cache.get(&"a", None), None);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
