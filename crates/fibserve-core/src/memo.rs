//! Fast Doubling routed through the shared memo table at every level.
//!
//! The recursive formulation looks up `n`, then `n / 2`, and so on until a
//! lookup hits or the base case is reached, and fills in the missing levels
//! on the way back up. This module walks the same halving chain with an
//! explicit stack of pending indices, so lookups, promotions, and inserts
//! happen in the same order without recursion.

use std::sync::Arc;

use crate::cache::FibCache;
use crate::fastdoubling::{doubling_step, FibPair};
use crate::options::Options;

/// Compute `(F(n), F(n+1))`, reusing and populating `cache`.
///
/// Observably identical to [`crate::fastdoubling::fast_doubling_with`].
/// Each cache operation takes the lock once; the big-integer work for a
/// level runs with the lock released.
///
/// # Example
/// ```
/// use fibserve_core::cache::FibCache;
/// use fibserve_core::memo::memoized_fast_doubling;
/// use fibserve_core::options::Options;
///
/// let cache = FibCache::new(1000).unwrap();
/// let pair = memoized_fast_doubling(&cache, 100, &Options::default());
/// assert_eq!(pair.value.to_string(), "354224848179261915075");
/// assert!(cache.contains(50));
/// ```
pub fn memoized_fast_doubling(cache: &FibCache, n: u64, opts: &Options) -> Arc<FibPair> {
    let mut pending = Vec::with_capacity(65);
    let mut k = n;

    let mut current = loop {
        if let Some(hit) = cache.get(k) {
            break Some(hit);
        }
        pending.push(k);
        if k == 0 {
            break None;
        }
        k >>= 1;
    };

    tracing::debug!(n, missing_levels = pending.len(), "memoized fast doubling");

    for &k in pending.iter().rev() {
        let pair = match &current {
            Some(half) => doubling_step(half, k & 1 == 1, opts),
            // Only the base index can be reached without a level below it.
            None => FibPair::base(),
        };
        let pair = Arc::new(pair);
        cache.insert(k, Arc::clone(&pair));
        current = Some(pair);
    }

    current.unwrap_or_else(|| Arc::new(FibPair::base()))
}
