//! Full-screen admin console for the school CMS.

pub mod common;
pub mod effects;
pub mod events;
pub mod flow;
pub mod home;
pub mod lockout;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};
use std::sync::Arc;

use anyhow::Result;
use homeroom_core::auth::{AuthClient, AuthService, ResetRequest, SessionStore};
use homeroom_core::config::Config;
pub use runtime::{SharedAuth, TuiRuntime};
use tokio::sync::Mutex;

/// Runs the interactive console.
///
/// When `reset` carries a token and email from a reset link, the console
/// opens directly on the reset-password screen instead of checking the
/// stored session.
///
/// # Errors
/// Returns an error if stderr is not a terminal or the terminal cannot
/// be set up.
pub async fn run_console(config: &Config, reset: Option<ResetRequest>) -> Result<()> {
    // The console requires a terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The console requires a terminal.\n\
             Use `homeroom login` for non-interactive sign-in."
        );
    }

    let client = AuthClient::new(config);
    let store = SessionStore::new();
    let auth: SharedAuth = Arc::new(Mutex::new(AuthService::new(client, store)));

    let mut runtime = TuiRuntime::new(auth, config.school_name.clone(), reset)?;
    runtime.run()?;

    Ok(())
}
