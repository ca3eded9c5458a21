//! Application configuration from CLI flags and environment.

use clap::Parser;

use fibserve_core::{FibError, Options, DEFAULT_CACHE_CAPACITY, DEFAULT_PARALLEL_THRESHOLD};

/// fibserve: memoized Fibonacci service.
#[derive(Parser, Debug, Clone)]
#[command(name = "fibserve", version, about)]
pub struct AppConfig {
    /// Compute a single Fibonacci number, print the response payload, and exit.
    #[arg(short, long, allow_negative_numbers = true, env = "FIBSERVE_N")]
    pub n: Option<i64>,

    /// Address to bind the HTTP server to.
    #[arg(long, default_value = "0.0.0.0", env = "FIBSERVE_HOST")]
    pub host: String,

    /// Port to bind the HTTP server to.
    #[arg(short, long, default_value_t = 8000, env = "FIBSERVE_PORT")]
    pub port: u16,

    /// Maximum number of Fibonacci pairs kept in the memo table.
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY, env = "FIBSERVE_CACHE_CAPACITY")]
    pub cache_capacity: usize,

    /// Operand size in bits above which doubling steps run in parallel (0 = never).
    #[arg(long, default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
    pub parallel_threshold: usize,

    /// Disable memoization and run the bare engine.
    #[arg(long)]
    pub no_cache: bool,

    /// Quiet mode (one-shot only): print just the number.
    #[arg(short, long)]
    pub quiet: bool,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Engine options derived from the flags.
    ///
    /// # Errors
    /// Returns [`FibError::Config`] for a zero cache capacity while
    /// memoization is enabled.
    pub fn options(&self) -> Result<Options, FibError> {
        if !self.no_cache && self.cache_capacity == 0 {
            return Err(FibError::Config(
                "--cache-capacity must be greater than zero".to_string(),
            ));
        }
        Ok(Options {
            parallel_threshold: self.parallel_threshold,
            cache_capacity: self.cache_capacity,
        })
    }

    /// `host:port` for the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("fibserve").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.n, None);
        assert_eq!(config.port, 8000);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.options().unwrap(), Options::default());
    }

    #[test]
    fn negative_n_parses() {
        let config = parse(&["-n", "-5"]);
        assert_eq!(config.n, Some(-5));
    }

    #[test]
    fn zero_capacity_rejected_only_with_cache() {
        let config = parse(&["--cache-capacity", "0"]);
        assert!(matches!(config.options(), Err(FibError::Config(_))));

        let config = parse(&["--cache-capacity", "0", "--no-cache"]);
        assert!(config.options().is_ok());
    }

    #[test]
    fn custom_bind() {
        let config = parse(&["--host", "127.0.0.1", "-p", "9000"]);
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn non_integer_n_rejected() {
        assert!(AppConfig::try_parse_from(["fibserve", "-n", "4.0"]).is_err());
    }
}
