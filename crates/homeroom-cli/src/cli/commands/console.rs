//! Console command handler.

use anyhow::{Context, Result};
use homeroom_core::auth::ResetRequest;
use homeroom_core::config::Config;

pub async fn run(config: &Config, reset: Option<ResetRequest>) -> Result<()> {
    homeroom_tui::run_console(config, reset)
        .await
        .context("console failed")?;
    Ok(())
}
