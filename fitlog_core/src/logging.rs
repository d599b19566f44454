//! Tracing setup for fitlog.
//!
//! Events always go to stderr. The CLI prints tables and `--json` documents
//! on stdout, and those must stay machine-readable whatever the log level.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Set up tracing with `default_level` as the fallback filter
///
/// The `fitlog` binary passes `warn`, or `debug` under `--verbose`.
/// `RUST_LOG` wins over either, e.g. `RUST_LOG=fitlog_core::journal=debug`
/// to watch record loading alone.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route events into the test harness's captured output
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
