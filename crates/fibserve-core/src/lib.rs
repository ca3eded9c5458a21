//! # fibserve-core
//!
//! Fast Doubling Fibonacci engine over arbitrary-precision integers, with a
//! bounded LRU memo table shared by every caller.

pub mod cache;
pub mod calculator;
pub mod constants;
pub mod fastdoubling;
pub mod memo;
pub mod options;
pub mod stats;

// Re-exports
pub use cache::FibCache;
pub use calculator::{validate_index, Calculator, FastDoubling, FibError, MemoizedFastDoubling};
pub use constants::{
    exit_codes, DEFAULT_CACHE_CAPACITY, DEFAULT_PARALLEL_THRESHOLD, ELAPSED_MS_DECIMALS,
};
pub use fastdoubling::{fast_doubling, FibPair};
pub use memo::memoized_fast_doubling;
pub use options::Options;
pub use stats::CacheStats;

use num_bigint::BigUint;

/// Compute F(n) using the fast doubling algorithm.
///
/// This is a convenience function for one-off use. Long-running callers
/// should hold a [`MemoizedFastDoubling`] so repeated requests share work.
///
/// # Example
/// ```
/// assert_eq!(fibserve_core::fibonacci(10).to_string(), "55");
/// assert_eq!(fibserve_core::fibonacci(0).to_string(), "0");
/// ```
#[must_use]
pub fn fibonacci(n: u64) -> BigUint {
    fast_doubling(n).value
}
