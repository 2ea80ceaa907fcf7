use crate::error::{PropError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

type SharedFetch<V> = Shared<BoxFuture<'static, std::result::Result<V, Arc<PropError>>>>;

struct Pending<V> {
    generation: u64,
    future: SharedFetch<V>,
}

/// Per-key de-duplication of expensive fetches.
///
/// At most one fetch is outstanding per key. Callers arriving while it runs
/// await the same shared future and observe the same success or failure.
/// The entry is removed when the fetch settles, so the next call starts
/// a fresh one.
pub struct InFlight<K, V> {
    pending: Arc<DashMap<K, Pending<V>>>,
    next_generation: AtomicU64,
}

impl<K, V> InFlight<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + std::fmt::Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            pending: Arc::new(DashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Run `fetch` for `key`, or join the fetch already running for it.
    ///
    /// `fetch` is only invoked when no fetch for `key` is outstanding.
    pub async fn run<F, Fut>(&self, key: K, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        // The shard guard must not live across the await below
        let shared = match self.pending.entry(key.clone()) {
            Entry::Occupied(entry) => {
                debug!(?key, "joining in-flight fetch");
                entry.get().future.clone()
            }
            Entry::Vacant(entry) => {
                let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                let pending = Arc::clone(&self.pending);
                let settle_key = key.clone();
                let fetch = fetch();

                let future = async move {
                    let outcome = fetch.await.map_err(Arc::new);
                    pending.remove_if(&settle_key, |_, p| p.generation == generation);
                    outcome
                }
                .boxed()
                .shared();

                entry.insert(Pending {
                    generation,
                    future: future.clone(),
                });
                future
            }
        };

        shared.await.map_err(PropError::Shared)
    }

    /// Number of fetches currently outstanding.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<K, V> Default for InFlight<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + std::fmt::Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
