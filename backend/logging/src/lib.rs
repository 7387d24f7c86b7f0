//! Structured logging setup for SnapSolve.
//!
//! Wraps `tracing` with environment-based level control. `RUST_LOG` wins
//! over the configured default level.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global logger. Safe to call more than once; later calls
/// are no-ops.
pub fn init_logger(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}
