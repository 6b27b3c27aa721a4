//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured level when it is set.

use leavesync_domain::{LeaveSyncError, LoggingConfig, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// JSON output is flattened for log aggregation; otherwise the human
/// readable formatter is used.
///
/// # Errors
/// Returns `LeaveSyncError::Config` when the filter directive is invalid or
/// a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level)?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry
            .with(fmt::layer().json().with_target(true).with_current_span(true).flatten_event(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    installed.map_err(|e| LeaveSyncError::Config(format!("Failed to install tracing subscriber: {e}")))?;

    tracing::info!(level = %config.level, json = config.json, "Logging initialized");
    Ok(())
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| LeaveSyncError::Config(format!("Invalid log filter '{level}': {e}")))
}

/// Test-friendly subscriber; safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("debug").try_init();
}
