//! # fibserve-server
//!
//! Request handler and axum routes exposing the memoized Fibonacci engine
//! over HTTP.

pub mod handler;
pub mod payload;
pub mod routes;

pub use handler::RequestHandler;
pub use payload::{FibResponse, Status};
pub use routes::{router, AppState};

use anyhow::Context;
use tokio::net::TcpListener;

/// Serve `state` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let addr = listener.local_addr().context("listener has no local address")?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
