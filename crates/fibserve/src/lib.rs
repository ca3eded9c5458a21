//! fibserve library: application logic for the Fibonacci service binary.

pub mod app;
pub mod config;
pub mod errors;
