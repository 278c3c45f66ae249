//! Tracing/logging setup shared by the API binary and tests.

use tracing_subscriber::EnvFilter;

/// Initialize process-wide tracing.
///
/// Filtering comes from `RUST_LOG`, defaulting to `info`. Safe to call more
/// than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init();
}
