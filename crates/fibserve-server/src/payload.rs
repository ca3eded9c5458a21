//! Response payloads and elapsed-time formatting.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use fibserve_core::{CacheStats, FibCache};

/// Outcome of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The value was computed.
    Ok,
    /// The input is outside the supported domain (negative index).
    Unsupported,
}

/// Payload returned for `/fibonacci/{input}` and by the one-shot CLI mode.
///
/// `nth_fibonacci` is a decimal string: the value is unbounded and JSON
/// numbers are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibResponse {
    pub nth_fibonacci: Option<String>,
    pub status: Status,
    pub execution_time_in_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FibResponse {
    /// A computed value with its elapsed time.
    #[must_use]
    pub fn ok(value: String, elapsed: Duration, decimals: i32) -> Self {
        Self {
            nth_fibonacci: Some(value),
            status: Status::Ok,
            execution_time_in_ms: Some(round_ms(elapsed, decimals)),
            message: None,
        }
    }

    /// A well-formed refusal carrying no value.
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self {
            nth_fibonacci: None,
            status: Status::Unsupported,
            execution_time_in_ms: None,
            message: Some(message.into()),
        }
    }
}

/// Payload for `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutesResponse {
    pub routes: Vec<String>,
}

/// Memo-table occupancy plus counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheReport {
    pub len: usize,
    pub capacity: usize,
    pub hit_ratio: f64,
    #[serde(flatten)]
    pub stats: CacheStats,
}

impl CacheReport {
    #[must_use]
    pub fn from_cache(cache: &FibCache) -> Self {
        let stats = cache.stats();
        Self {
            len: cache.len(),
            capacity: cache.capacity(),
            hit_ratio: stats.hit_ratio(),
            stats,
        }
    }
}

/// Payload for `/stats`. `cache` is `null` when memoization is disabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    pub calculator: String,
    pub cache: Option<CacheReport>,
}

/// Milliseconds in `elapsed`, rounded to `decimals` places.
#[must_use]
pub fn round_ms(elapsed: Duration, decimals: i32) -> f64 {
    let ms = elapsed.as_secs_f64() * 1000.0;
    let scale = 10f64.powi(decimals);
    (ms * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_four_places() {
        let elapsed = Duration::from_nanos(1_234_567);
        assert!((round_ms(elapsed, 4) - 1.2346).abs() < 1e-12);
        assert!((round_ms(Duration::ZERO, 4)).abs() < f64::EPSILON);
    }

    #[test]
    fn round_whole_seconds() {
        assert!((round_ms(Duration::from_secs(2), 4) - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ok_payload_json() {
        let resp = FibResponse::ok("55".into(), Duration::from_micros(1500), 4);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["nth_fibonacci"], "55");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["execution_time_in_ms"], 1.5);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn unsupported_payload_json() {
        let resp = FibResponse::unsupported("negative arguments not implemented: -1");
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["nth_fibonacci"].is_null());
        assert!(json["execution_time_in_ms"].is_null());
        assert_eq!(json["status"], "unsupported");
        assert_eq!(json["message"], "negative arguments not implemented: -1");
    }

    #[test]
    fn payload_round_trips_through_json() {
        let resp = FibResponse::unsupported("nope");
        let text = serde_json::to_string(&resp).unwrap();
        let back: FibResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(back, resp);
    }

    #[test]
    fn cache_report_flattens_stats() {
        let cache = FibCache::new(8).unwrap();
        let report = CacheReport::from_cache(&cache);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["capacity"], 8);
        assert_eq!(json["len"], 0);
        assert_eq!(json["hits"], 0);
        assert_eq!(json["evictions"], 0);
    }
}
