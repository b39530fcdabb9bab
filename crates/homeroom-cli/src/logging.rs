//! Logging setup.
//!
//! File-only: the console owns the terminal, so log output goes to a
//! daily-rolling file under `<home>/logs/` instead of stdout/stderr.
//! The filter comes from `$HOMEROOM_LOG` (default `info`).

use std::fs;

use anyhow::{Context, Result};
use homeroom_core::config::paths;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the global tracing subscriber.
///
/// # Errors
/// Returns an error if the logs directory cannot be created.
pub fn init() -> Result<()> {
    let logs_dir = paths::logs_dir();
    fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create directory {}", logs_dir.display()))?;

    let filter = EnvFilter::try_from_env("HOMEROOM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let appender = tracing_appender::rolling::daily(&logs_dir, "homeroom.log");
    let file_layer = fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Ok(())
}
