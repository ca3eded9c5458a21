//! Calculation options and configuration.

use crate::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_PARALLEL_THRESHOLD};

/// Options for Fibonacci calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Threshold (in bits) for parallel multiplication (0 = never parallel).
    pub parallel_threshold: usize,
    /// Maximum number of entries in the memo table.
    pub cache_capacity: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Options {
    /// Sequential options: doubling steps never fan out to rayon.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: 0,
            ..Self::default()
        }
    }

    /// Whether a doubling step on operands of `bits` bits should run in parallel.
    #[must_use]
    pub fn should_parallelize(&self, bits: u64) -> bool {
        self.parallel_threshold > 0 && bits >= self.parallel_threshold as u64
    }
}
