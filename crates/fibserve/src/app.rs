//! Application entry point and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use fibserve_core::{Calculator, FastDoubling, FibCache, FibError, MemoizedFastDoubling};
use fibserve_server::{AppState, FibResponse, RequestHandler};

use crate::config::AppConfig;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    let (calculator, cache) = build_calculator(config)?;
    let handler = RequestHandler::new(calculator);

    // One-shot mode
    if let Some(n) = config.n {
        let response = handler.handle(n);
        return print_response(&response, config.quiet);
    }

    run_server(config, AppState::new(handler, cache))
}

/// Build the calculator selected by `config`, plus the memo table it shares
/// (if any). The table is created once here and handed to every caller.
pub fn build_calculator(
    config: &AppConfig,
) -> Result<(Arc<dyn Calculator>, Option<Arc<FibCache>>), FibError> {
    let opts = config.options()?;

    if config.no_cache {
        tracing::info!(parallel_threshold = opts.parallel_threshold, "memoization disabled");
        return Ok((Arc::new(FastDoubling::new(opts)), None));
    }

    let cache = Arc::new(FibCache::new(opts.cache_capacity)?);
    tracing::info!(
        capacity = opts.cache_capacity,
        parallel_threshold = opts.parallel_threshold,
        "memo table ready"
    );
    let calc = MemoizedFastDoubling::new(Arc::clone(&cache), opts);
    Ok((Arc::new(calc), Some(cache)))
}

fn print_response(response: &FibResponse, quiet: bool) -> Result<()> {
    if quiet {
        match (&response.nth_fibonacci, &response.message) {
            (Some(value), _) => println!("{value}"),
            (None, Some(message)) => eprintln!("{message}"),
            (None, None) => {}
        }
        return Ok(());
    }

    let json = serde_json::to_string(response).context("failed to encode response")?;
    println!("{json}");
    Ok(())
}

fn run_server(config: &AppConfig, state: AppState) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    runtime.block_on(serve_on(config.bind_addr(), state))
}

async fn serve_on(addr: String, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    fibserve_server::serve(listener, state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("fibserve").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn memoized_by_default() {
        let (calc, cache) = build_calculator(&config(&["--cache-capacity", "12"])).unwrap();
        assert_eq!(calc.name(), "MemoizedFastDoubling");
        let cache = cache.unwrap();
        assert_eq!(cache.capacity(), 12);

        calc.compute(40).unwrap();
        assert!(!cache.is_empty());
    }

    #[test]
    fn no_cache_flag() {
        let (calc, cache) = build_calculator(&config(&["--no-cache"])).unwrap();
        assert_eq!(calc.name(), "FastDoubling");
        assert!(cache.is_none());
    }

    #[test]
    fn zero_capacity_is_config_error() {
        let err = build_calculator(&config(&["--cache-capacity", "0"])).err();
        assert!(matches!(err, Some(FibError::Config(_))));
    }

    #[test]
    fn one_shot_run_succeeds() {
        assert!(run(&config(&["-n", "30", "-q"])).is_ok());
        assert!(run(&config(&["-n", "-30"])).is_ok());
    }
}
