//! fibserve: memoized Fibonacci service.

use fibserve_lib::{app, config, errors};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so one-shot payloads on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::AppConfig::parse();
    let result = app::run(&config);
    if let Err(err) = &result {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(errors::exit_code(&result));
}
