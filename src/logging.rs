//! Logging setup.
//!
//! Uses `tracing` with a `tracing-subscriber` fmt layer. The level filter
//! comes from `RUST_LOG` (default `info`), e.g.
//! `RUST_LOG=proctor_schedule=debug` to trace every assignment.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// # Example
/// ```no_run
/// proctor_schedule::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .init();
}

/// Installs a debug-level subscriber that writes through the test harness.
///
/// Safe to call from several tests; only the first call installs.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
