//! HTTP routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use fibserve_core::FibCache;

use crate::handler::RequestHandler;
use crate::payload::{CacheReport, FibResponse, RoutesResponse, StatsResponse};

/// Route advertised at `/` for the computation endpoint.
pub const FIBONACCI_ROUTE: &str = "/fibonacci/{input:int}";
/// Route advertised at `/` for cache statistics.
pub const STATS_ROUTE: &str = "/stats";

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    handler: Arc<RequestHandler>,
    cache: Option<Arc<FibCache>>,
}

impl AppState {
    /// `cache` is reported at `/stats`; pass `None` when memoization is off.
    #[must_use]
    pub fn new(handler: RequestHandler, cache: Option<Arc<FibCache>>) -> Self {
        Self {
            handler: Arc::new(handler),
            cache,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/fibonacci/{input}", get(fibonacci))
        .route(STATS_ROUTE, get(stats))
        .with_state(state)
}

async fn root() -> Json<RoutesResponse> {
    Json(RoutesResponse {
        routes: vec![FIBONACCI_ROUTE.to_string(), STATS_ROUTE.to_string()],
    })
}

async fn fibonacci(
    State(state): State<AppState>,
    Path(input): Path<i64>,
) -> Result<Json<FibResponse>, (StatusCode, String)> {
    let handler = Arc::clone(&state.handler);
    // CPU-bound; keep it off the async workers.
    let response = tokio::task::spawn_blocking(move || handler.handle(input))
        .await
        .map_err(|e| {
            tracing::error!(input, error = %e, "computation task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("computation task failed: {e}"),
            )
        })?;
    Ok(Json(response))
}

async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        calculator: state.handler.calculator_name().to_string(),
        cache: state.cache.as_deref().map(CacheReport::from_cache),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use fibserve_core::{FastDoubling, MemoizedFastDoubling, Options};

    fn memoized_state() -> (AppState, Arc<FibCache>) {
        let cache = Arc::new(FibCache::new(100).unwrap());
        let calc = MemoizedFastDoubling::new(Arc::clone(&cache), Options::default());
        let state = AppState::new(RequestHandler::new(Arc::new(calc)), Some(Arc::clone(&cache)));
        (state, cache)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn root_lists_routes() {
        let (state, _) = memoized_state();
        let (status, json) = get_json(router(state), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["routes"][0], FIBONACCI_ROUTE);
        assert_eq!(json["routes"][1], STATS_ROUTE);
    }

    #[tokio::test]
    async fn fibonacci_value() {
        let (state, _) = memoized_state();
        let (status, json) = get_json(router(state), "/fibonacci/100").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["nth_fibonacci"], "354224848179261915075");
        assert_eq!(json["status"], "ok");
        assert!(json["execution_time_in_ms"].is_f64());
    }

    #[tokio::test]
    async fn negative_input_is_soft_failure() {
        let (state, cache) = memoized_state();
        let (status, json) = get_json(router(state), "/fibonacci/-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "unsupported");
        assert!(json["nth_fibonacci"].is_null());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn non_integer_input_rejected() {
        let (state, _) = memoized_state();
        let (status, _) = get_json(router(state.clone()), "/fibonacci/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = get_json(router(state), "/fibonacci/4.0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn requests_share_the_cache() {
        let (state, cache) = memoized_state();
        let app = router(state);
        let _ = get_json(app.clone(), "/fibonacci/100").await;
        let (_, json) = get_json(app.clone(), "/fibonacci/50").await;
        assert_eq!(json["nth_fibonacci"], "12586269025");

        let (status, stats) = get_json(app, "/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["calculator"], "MemoizedFastDoubling");
        assert_eq!(stats["cache"]["hits"], 1);
        assert_eq!(stats["cache"]["len"], cache.len());
        assert_eq!(stats["cache"]["capacity"], 100);
    }

    #[tokio::test]
    async fn stats_without_cache() {
        let state = AppState::new(RequestHandler::new(Arc::new(FastDoubling::default())), None);
        let (status, json) = get_json(router(state), "/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["calculator"], "FastDoubling");
        assert!(json["cache"].is_null());
    }
}
