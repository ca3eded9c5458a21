//! Fast Doubling engine for Fibonacci computation.
//!
//! Uses the doubling identities:
//!   F(2k)   = F(k) * (2*F(k+1) - F(k))
//!   F(2k+1) = F(k)^2 + F(k+1)^2
//!
//! The halving recursion `n -> n / 2` is unrolled into a scan of the bits
//! of `n` from MSB to LSB, so stack depth does not grow with `n`.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::options::Options;

/// The pair `(F(k), F(k+1))`, the unit of work of the doubling recursion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FibPair {
    /// F(k).
    pub value: BigUint,
    /// F(k+1).
    pub next: BigUint,
}

impl FibPair {
    /// Create a pair from its two terms.
    #[must_use]
    pub fn new(value: BigUint, next: BigUint) -> Self {
        Self { value, next }
    }

    /// The base case `(F(0), F(1)) = (0, 1)`.
    #[must_use]
    pub fn base() -> Self {
        Self {
            value: BigUint::zero(),
            next: BigUint::one(),
        }
    }

    /// Split into `(F(k), F(k+1))`.
    #[must_use]
    pub fn into_tuple(self) -> (BigUint, BigUint) {
        (self.value, self.next)
    }
}

impl From<(u64, u64)> for FibPair {
    fn from((value, next): (u64, u64)) -> Self {
        Self::new(BigUint::from(value), BigUint::from(next))
    }
}

/// One level of the doubling recursion.
///
/// Given `half = (F(k), F(k+1))` with `k = n / 2` and the low bit of `n`,
/// returns `(F(n), F(n+1))`.
#[must_use]
pub fn doubling_step(half: &FibPair, odd: bool, opts: &Options) -> FibPair {
    let a = &half.value;
    let b = &half.next;

    // F(k+1) >= F(k) for every k, so 2b - a never underflows.
    let t = (b << 1u32) - a;
    let max_bits = a.bits().max(b.bits());

    let (c, d) = if opts.should_parallelize(max_bits) {
        let (c, (a_sq, b_sq)) = rayon::join(|| a * &t, || rayon::join(|| a * a, || b * b));
        (c, a_sq + b_sq)
    } else {
        (a * &t, a * a + b * b)
    };

    if odd {
        let next = c + &d;
        FibPair::new(d, next)
    } else {
        FibPair::new(c, d)
    }
}

/// Compute `(F(n), F(n+1))` with default options.
///
/// `n` is unsigned, so a negative index cannot reach this function; callers
/// holding signed input must go through [`crate::calculator::validate_index`].
///
/// # Example
/// ```
/// use fibserve_core::fastdoubling::fast_doubling;
///
/// let pair = fast_doubling(10);
/// assert_eq!(pair.value.to_string(), "55");
/// assert_eq!(pair.next.to_string(), "89");
/// ```
#[must_use]
pub fn fast_doubling(n: u64) -> FibPair {
    fast_doubling_with(n, &Options::default())
}

/// Compute `(F(n), F(n+1))` with explicit options.
#[must_use]
pub fn fast_doubling_with(n: u64, opts: &Options) -> FibPair {
    let num_bits = 64 - n.leading_zeros();
    let mut pair = FibPair::base();

    for i in (0..num_bits).rev() {
        pair = doubling_step(&pair, (n >> i) & 1 == 1, opts);
    }

    pair
}
