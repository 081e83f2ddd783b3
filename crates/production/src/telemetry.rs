//! Logging setup for the runner binary.

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber.
///
/// `default_filter` applies unless `RUST_LOG` is set. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}
