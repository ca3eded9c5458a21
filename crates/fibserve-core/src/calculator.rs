//! Calculator trait and its two implementations.
//!
//! `Calculator` is the seam consumed by the request handler.
//! `MemoizedFastDoubling` routes every level through a shared `FibCache`.
//! `FastDoubling` runs the bare engine and keeps no state.

use std::sync::Arc;

use crate::cache::FibCache;
use crate::fastdoubling::{fast_doubling_with, FibPair};
use crate::memo::memoized_fast_doubling;
use crate::options::Options;

/// Error type for Fibonacci calculations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FibError {
    /// The index is negative.
    #[error("negative arguments not implemented: {0}")]
    InvalidInput(i64),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Check that a signed index is usable by the engine.
///
/// # Errors
/// Returns [`FibError::InvalidInput`] for `n < 0`.
pub fn validate_index(n: i64) -> Result<u64, FibError> {
    u64::try_from(n).map_err(|_| FibError::InvalidInput(n))
}

/// Public trait for Fibonacci calculators.
pub trait Calculator: Send + Sync {
    /// Compute `(F(n), F(n+1))`.
    fn compute(&self, n: i64) -> Result<Arc<FibPair>, FibError>;

    /// Get the name of this calculator.
    fn name(&self) -> &str;
}

/// Fast Doubling backed by a shared memo table.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use fibserve_core::{Calculator, FibCache, MemoizedFastDoubling, Options};
///
/// let calc = MemoizedFastDoubling::new(Arc::new(FibCache::default()), Options::default());
/// assert_eq!(calc.compute(10).unwrap().value.to_string(), "55");
/// assert!(calc.compute(-1).is_err());
/// ```
pub struct MemoizedFastDoubling {
    cache: Arc<FibCache>,
    opts: Options,
}

impl MemoizedFastDoubling {
    /// Create a calculator sharing `cache` with every other holder of the `Arc`.
    #[must_use]
    pub fn new(cache: Arc<FibCache>, opts: Options) -> Self {
        Self { cache, opts }
    }

    /// Build a calculator with its own table sized from `opts`.
    pub fn from_options(opts: Options) -> Result<Self, FibError> {
        let cache = FibCache::new(opts.cache_capacity)?;
        Ok(Self::new(Arc::new(cache), opts))
    }

    /// The shared memo table.
    #[must_use]
    pub fn cache(&self) -> &Arc<FibCache> {
        &self.cache
    }
}

impl Calculator for MemoizedFastDoubling {
    fn compute(&self, n: i64) -> Result<Arc<FibPair>, FibError> {
        let n = validate_index(n)?;
        Ok(memoized_fast_doubling(&self.cache, n, &self.opts))
    }

    fn name(&self) -> &'static str {
        "MemoizedFastDoubling"
    }
}

/// Fast Doubling without memoization.
#[derive(Debug, Clone, Default)]
pub struct FastDoubling {
    opts: Options,
}

impl FastDoubling {
    #[must_use]
    pub fn new(opts: Options) -> Self {
        Self { opts }
    }
}

impl Calculator for FastDoubling {
    fn compute(&self, n: i64) -> Result<Arc<FibPair>, FibError> {
        let n = validate_index(n)?;
        Ok(Arc::new(fast_doubling_with(n, &self.opts)))
    }

    fn name(&self) -> &'static str {
        "FastDoubling"
    }
}
