//! Thread-safe bounded LRU memo table for Fibonacci pairs.
//!
//! Every lookup hit and every insert promotes the key to most-recently-used;
//! inserting a new key into a full table evicts the least-recently-used
//! entry first. Values are stored behind `Arc`, so the lock only ever guards
//! pointer bookkeeping and never a big-integer copy.
//!
//! Keys are the bare `u64` index. Dynamic hosts that distinguish an integer
//! `4` from a float-tagged `4` cache them separately; the index type here is
//! a single unsigned integer, so that distinction cannot arise and the key
//! carries no representation tag.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use crate::calculator::FibError;
use crate::constants::DEFAULT_CACHE_CAPACITY;
use crate::fastdoubling::FibPair;
use crate::stats::{AtomicCacheStats, CacheStats};

/// Shared memo table keyed by Fibonacci index.
pub struct FibCache {
    entries: Mutex<LruCache<u64, Arc<FibPair>>>,
    stats: AtomicCacheStats,
}

impl FibCache {
    /// Create a table holding at most `capacity` pairs.
    ///
    /// # Errors
    /// Returns [`FibError::Config`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, FibError> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            FibError::Config("cache capacity must be greater than zero".to_string())
        })?;
        Ok(Self::with_capacity(capacity))
    }

    /// Create a table with a capacity that is already known to be non-zero.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            stats: AtomicCacheStats::new(),
        }
    }

    /// Look up the pair for `n`, promoting it to most-recently-used on a hit.
    pub fn get(&self, n: u64) -> Option<Arc<FibPair>> {
        let hit = self.entries.lock().get(&n).cloned();
        if hit.is_some() {
            self.stats.record_hit();
            tracing::trace!(n, "memo hit");
        } else {
            self.stats.record_miss();
        }
        hit
    }

    /// Store the pair for `n` as most-recently-used, evicting the
    /// least-recently-used entry if the table is full.
    pub fn insert(&self, n: u64, pair: Arc<FibPair>) {
        // The displaced value is dropped after the lock is released.
        let displaced = self.entries.lock().push(n, pair);
        self.stats.record_insertion();

        if let Some((evicted, _)) = displaced {
            if evicted != n {
                self.stats.record_eviction();
                tracing::trace!(evicted, inserted = n, "memo eviction");
            }
        }
    }

    /// Whether `n` is present. Does not touch recency.
    #[must_use]
    pub fn contains(&self, n: u64) -> bool {
        self.entries.lock().contains(&n)
    }

    /// Current number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    /// Keys ordered from most- to least-recently-used.
    #[must_use]
    pub fn keys(&self) -> Vec<u64> {
        self.entries.lock().iter().map(|(k, _)| *k).collect()
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Snapshot of hit/miss/insert/evict counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Reset the counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}

impl Default for FibCache {
    fn default() -> Self {
        Self::with_capacity(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

impl std::fmt::Debug for FibCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FibCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("stats", &self.stats())
            .finish()
    }
}
