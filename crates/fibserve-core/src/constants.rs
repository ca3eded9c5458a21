//! Constants for the Fibonacci engine, memo table, and response shaping.

/// Default number of entries kept in the memo table.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Default threshold (in bits) above which the three products of a
/// doubling step run in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Decimal places kept when reporting elapsed time in milliseconds.
pub const ELAPSED_MS_DECIMALS: i32 = 4;

/// Largest index whose Fibonacci number fits in a u64.
/// F(93) = 12200160415121876738
pub const MAX_FIB_U64: u64 = 93;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
}
