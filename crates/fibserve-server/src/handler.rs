//! Request handler: sign check, timed computation, payload shaping.

use std::sync::Arc;
use std::time::Instant;

use fibserve_core::{Calculator, FibError, ELAPSED_MS_DECIMALS};

use crate::payload::FibResponse;

/// Turns a raw index into a [`FibResponse`].
///
/// Negative input is answered with a `unsupported` payload instead of an
/// error, so the transport can always reply with a normal response.
pub struct RequestHandler {
    calculator: Arc<dyn Calculator>,
    decimals: i32,
}

impl RequestHandler {
    #[must_use]
    pub fn new(calculator: Arc<dyn Calculator>) -> Self {
        Self {
            calculator,
            decimals: ELAPSED_MS_DECIMALS,
        }
    }

    /// Name of the underlying calculator.
    #[must_use]
    pub fn calculator_name(&self) -> &str {
        self.calculator.name()
    }

    /// Compute F(n) and shape the payload.
    ///
    /// The clock covers only the `compute` call, so cache hits show up as
    /// near-zero times.
    pub fn handle(&self, n: i64) -> FibResponse {
        let start = Instant::now();
        let result = self.calculator.compute(n);
        let elapsed = start.elapsed();

        match result {
            Ok(pair) => {
                let response = FibResponse::ok(pair.value.to_string(), elapsed, self.decimals);
                tracing::debug!(
                    n,
                    bits = pair.value.bits(),
                    elapsed_ms = ?response.execution_time_in_ms,
                    "computed"
                );
                response
            }
            Err(err @ FibError::InvalidInput(_)) => {
                tracing::debug!(n, "rejected negative index");
                FibResponse::unsupported(err.to_string())
            }
            Err(err) => {
                tracing::warn!(n, error = %err, "calculation failed");
                FibResponse::unsupported(err.to_string())
            }
        }
    }
}
