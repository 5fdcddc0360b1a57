//! Cache Store Module
//!
//! Memory-bounded memoization cache: wraps an expensive, deterministic
//! computation and keeps its results under a fixed byte budget with LRU
//! eviction.
//!
//! # Concurrency
//!
//! All bookkeeping (`entries`, recency order, `total_bytes`) lives behind one
//! exclusive lock; the expensive computation itself always runs outside that
//! lock so a slow load never blocks hits on other keys. Concurrent misses on
//! the same key are collapsed into a single computation: the first caller
//! runs it, the rest await the shared flight slot and receive the same value
//! (or the same cloned failure).

use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, EstimateSize, LruTracker, ESTIMATE_FALLBACK_BYTES};

/// Per-key flight slot shared by concurrent misses on one key.
type Flight<V, E> = Arc<OnceCell<Result<Arc<V>, E>>>;

// == Cache State ==
/// Bookkeeping guarded by the cache's exclusive lock.
#[derive(Debug)]
struct CacheState<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Running sum of entry sizes; always equals the sum over `entries`
    total_bytes: usize,
    /// Performance statistics
    stats: CacheStats,
}

// == Memo Cache ==
/// Memory-bounded memoization cache with LRU eviction.
///
/// Constructed once at process start with a fixed byte budget and owned
/// explicitly by the request layer. Values are stored behind `Arc` and are
/// immutable once cached; their size is estimated once, at insertion.
///
/// The error type `E` must be `Clone` so one propagated failure can be
/// handed to every caller waiting on the same in-flight computation.
#[derive(Debug)]
pub struct MemoCache<K, V, E> {
    /// Fixed byte budget, immutable after construction
    capacity_bytes: usize,
    state: Mutex<CacheState<K, V>>,
    /// In-flight computations, keyed like `entries`
    inflight: Mutex<HashMap<K, Flight<V, E>>>,
}

impl<K, V, E> MemoCache<K, V, E>
where
    K: Eq + Hash + Clone + Display,
    V: EstimateSize,
    E: Clone,
{
    // == Constructor ==
    /// Creates a new cache with the given byte budget.
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                lru: LruTracker::new(),
                total_bytes: 0,
                stats: CacheStats::new(),
            }),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    // == Get Or Compute ==
    /// Returns the cached value for `key`, computing it on first use.
    ///
    /// On a hit the stored value is returned and marked most recently used;
    /// `compute` is not invoked. On a miss `compute` runs outside the cache
    /// lock; a failure propagates verbatim and leaves the cache untouched,
    /// while a success is measured, inserted, and trimmed against the budget.
    ///
    /// Eviction removes least-recently-used entries until the byte total is
    /// back under budget, but never the entry just inserted: the cache always
    /// holds at least the most recently requested item, even when that single
    /// item exceeds the whole budget.
    pub async fn get_or_compute<F, Fut>(&self, key: K, compute: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.lookup(&key, true).await {
            return Ok(value);
        }

        let flight = {
            let mut inflight = self.inflight.lock().await;
            Arc::clone(inflight.entry(key.clone()).or_default())
        };

        let result = flight
            .get_or_init(|| async {
                // Another caller may have completed and released its flight
                // slot between our first probe and claiming this one.
                if let Some(value) = self.lookup(&key, false).await {
                    return Ok(value);
                }
                match compute().await {
                    Ok(value) => Ok(self.insert(key.clone(), value).await),
                    Err(err) => Err(err),
                }
            })
            .await
            .clone();

        // Release the flight slot; late waiters still holding it will
        // re-probe the cache. The pointer check keeps us from discarding a
        // newer flight started after ours resolved.
        {
            let mut inflight = self.inflight.lock().await;
            if let Some(slot) = inflight.get(&key) {
                if Arc::ptr_eq(slot, &flight) {
                    inflight.remove(&key);
                }
            }
        }

        if result.is_ok() {
            self.refresh(&key).await;
        }
        result
    }

    // == Invalidate ==
    /// Removes an entry, returning whether it was present.
    pub async fn invalidate(&self, key: &K) -> bool {
        let mut state = self.state.lock().await;
        match state.entries.remove(key) {
            Some(entry) => {
                state.lru.remove(key);
                state.total_bytes -= entry.size_bytes;
                let (entries, bytes) = (state.entries.len(), state.total_bytes);
                state.stats.set_totals(entries, bytes);
                true
            }
            None => false,
        }
    }

    // == Accessors ==
    /// Returns the configured byte budget.
    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        let mut stats = state.stats.clone();
        stats.set_totals(state.entries.len(), state.total_bytes);
        stats
    }

    /// Returns the current number of entries in the cache.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// Returns true if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    /// Returns the current sum of estimated entry sizes.
    pub async fn total_bytes(&self) -> usize {
        self.state.lock().await.total_bytes
    }

    /// Checks whether a key is currently cached, without touching recency.
    pub async fn contains(&self, key: &K) -> bool {
        self.state.lock().await.entries.contains_key(key)
    }

    // == Internal: Lookup ==
    /// Probes the cache; a present key is marked most recently used.
    ///
    /// `record` controls whether the probe counts toward hit/miss statistics;
    /// each `get_or_compute` call is counted exactly once, on its first probe.
    async fn lookup(&self, key: &K, record: bool) -> Option<Arc<V>> {
        let mut state = self.state.lock().await;
        let value = state.entries.get(key).map(|entry| Arc::clone(&entry.value));
        match value {
            Some(value) => {
                state.lru.touch(key);
                if record {
                    state.stats.record_hit();
                }
                Some(value)
            }
            None => {
                if record {
                    state.stats.record_miss();
                }
                None
            }
        }
    }

    /// Marks a key most recently used if it is still cached.
    async fn refresh(&self, key: &K) {
        let mut state = self.state.lock().await;
        if state.entries.contains_key(key) {
            state.lru.touch(key);
        }
    }

    // == Internal: Insert ==
    /// Stores a freshly computed value, then trims to the byte budget.
    async fn insert(&self, key: K, value: V) -> Arc<V> {
        let (size_bytes, fallback) = match value.estimate_bytes() {
            Some(bytes) => (bytes, false),
            None => (ESTIMATE_FALLBACK_BYTES, true),
        };
        let value = Arc::new(value);

        let mut state = self.state.lock().await;
        if fallback {
            warn!(
                key = %key,
                assumed_bytes = size_bytes,
                "Could not estimate value size, charging fallback"
            );
            state.stats.record_estimation_fallback();
        }

        // Single-flight means the key is normally absent here, but replacing
        // an existing entry must keep the byte total exact.
        let entry = CacheEntry::new(Arc::clone(&value), size_bytes);
        if let Some(old) = state.entries.insert(key.clone(), entry) {
            state.total_bytes -= old.size_bytes;
        }
        state.total_bytes += size_bytes;
        state.lru.touch(&key);

        // Evict stale entries until we are back under budget. The entry just
        // inserted is the freshest and is never the victim.
        while state.total_bytes > self.capacity_bytes && state.entries.len() > 1 {
            let victim = match state.lru.pop_oldest() {
                Some(victim) => victim,
                None => break,
            };
            if let Some(evicted) = state.entries.remove(&victim) {
                state.total_bytes -= evicted.size_bytes;
                state.stats.record_eviction();
                debug!(
                    key = %victim,
                    freed_bytes = evicted.size_bytes,
                    total_bytes = state.total_bytes,
                    "Evicted least recently used entry"
                );
            }
        }

        if state.total_bytes > self.capacity_bytes {
            state.stats.record_capacity_overflow();
            warn!(
                key = %key,
                size_bytes,
                capacity_bytes = self.capacity_bytes,
                "Single cached entry exceeds the byte budget"
            );
        }

        let (entries, bytes) = (state.entries.len(), state.total_bytes);
        state.stats.set_totals(entries, bytes);
        value
    }
}
