//! Logging initialization for embedding applications.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, otherwise defaults to `info` for this crate.
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chart_engine=info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
