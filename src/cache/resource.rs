use super::{InFlight, TimedCache};
use crate::error::Result;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Outcome of a cached lookup
#[derive(Debug, Clone)]
pub struct Lookup<V> {
    pub value: V,
    /// Age of the value when it was served
    pub age: Duration,
    /// Served from the cache rather than a fetch in this round
    pub from_cache: bool,
}

/// A cache plus its in-flight map: read, else fetch once, then write back.
///
/// The write happens inside the shared fetch, so concurrent waiters never
/// write the same value twice.
pub struct CachedResource<K, V>
where
    K: Eq + Hash,
{
    cache: Arc<TimedCache<K, V>>,
    inflight: InFlight<K, V>,
}

impl<K, V> CachedResource<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            cache: Arc::new(TimedCache::new()),
            inflight: InFlight::new(),
        }
    }

    /// Fresh cached value for `key`, or the result of one shared fetch.
    ///
    /// `refresh` skips the cache read but still joins a fetch already
    /// in flight for the same key.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: K,
        ttl: Option<Duration>,
        refresh: bool,
        fetch: F,
    ) -> Result<Lookup<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        if !refresh {
            if let Some(entry) = self.cache.get_entry(&key, ttl) {
                debug!(?key, "cache hit");
                return Ok(Lookup {
                    age: entry.age(),
                    value: entry.value,
                    from_cache: true,
                });
            }
        }
        debug!(?key, refresh, "cache miss");

        let cache = Arc::clone(&self.cache);
        let store_key = key.clone();
        let value = self
            .inflight
            .run(key, move || {
                let pending = fetch();
                async move {
                    let value = pending.await?;
                    cache.set(store_key, value.clone());
                    Ok(value)
                }
            })
            .await?;

        Ok(Lookup {
            value,
            age: Duration::ZERO,
            from_cache: false,
        })
    }

    pub fn cache(&self) -> &TimedCache<K, V> {
        &self.cache
    }
}

impl<K, V> Default for CachedResource<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
