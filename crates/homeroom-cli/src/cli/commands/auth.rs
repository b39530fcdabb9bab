//! Headless auth command handlers.
//!
//! Everything here prints to stdout/stderr and exits; the interactive
//! equivalents live in the console. Each `LoginOutcome` maps to one
//! message, and only an established session exits zero.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use homeroom_core::auth::{
    AuthClient, AuthService, LoginOutcome, SessionState, SessionStore, mask_token,
};
use homeroom_core::config::Config;

fn service(config: &Config) -> AuthService {
    AuthService::new(AuthClient::new(config), SessionStore::new())
}

/// Signs in and persists the session, prompting for missing values.
pub async fn login(config: &Config, email: Option<&str>) -> Result<()> {
    let email = match email {
        Some(value) => value.trim().to_string(),
        None => prompt("Email: ")?,
    };
    let password = prompt("Password: ")?;

    let mut auth = service(config);
    let outcome = auth.login(&email, &password).await?;
    match outcome {
        LoginOutcome::Authenticated(session) => {
            println!(
                "Signed in as {} <{}>",
                session.user.full_name, session.user.email
            );
            println!("Session token: {}", mask_token(&session.token));
            Ok(())
        }
        LoginOutcome::FirstTimeLoginRequired => anyhow::bail!(
            "This account must change its password before first use. \
             Run `homeroom` to complete the change."
        ),
        LoginOutcome::InvalidCredentials { attempts_remaining } => match attempts_remaining {
            Some(1) => anyhow::bail!("Invalid email or password. 1 attempt remaining."),
            Some(n) => anyhow::bail!("Invalid email or password. {n} attempts remaining."),
            None => anyhow::bail!("Invalid email or password."),
        },
        LoginOutcome::TemporaryLocked {
            remaining_seconds,
            message,
            ..
        } => anyhow::bail!("{message} Try again in {remaining_seconds}s."),
        LoginOutcome::PermanentlyLocked => {
            anyhow::bail!("This account is permanently locked. Contact the school office.")
        }
        LoginOutcome::AdminLocked => {
            anyhow::bail!("This account has been locked by an administrator.")
        }
        LoginOutcome::NetworkFailure => {
            anyhow::bail!("Could not reach the school CMS. Check your connection and try again.")
        }
    }
}

/// Deletes the stored session. Never contacts the backend.
pub fn logout(config: &Config) -> Result<()> {
    let mut auth = service(config);
    if auth.logout()? {
        println!("Signed out.");
    } else {
        println!("No session to clear.");
    }
    Ok(())
}

/// Validates the stored session and prints the restored identity.
pub async fn whoami(config: &Config) -> Result<()> {
    let mut auth = service(config);
    let state = auth.bootstrap().await?;
    match state {
        SessionState::Authenticated(session) => {
            println!(
                "{} <{}> ({})",
                session.user.full_name,
                session.user.email,
                session.user.role.label()
            );
            Ok(())
        }
        _ => anyhow::bail!("Not signed in."),
    }
}

/// Asks the backend to email a reset link.
pub async fn forgot_password(config: &Config, email: &str) -> Result<()> {
    let auth = service(config);
    match auth.request_password_reset(email.trim()).await {
        Ok(()) => {
            println!("If that email has an account, a reset link is on its way.");
            Ok(())
        }
        Err(err) => anyhow::bail!("{err}"),
    }
}

/// Reads one line from stdin, prompting on stderr so stdout stays clean.
fn prompt(label: &str) -> Result<String> {
    let mut err = io::stderr();
    write!(err, "{label}").context("write prompt")?;
    err.flush().context("flush prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read input")?;
    let value = line.trim_end_matches(['\r', '\n']).to_string();
    if value.is_empty() {
        anyhow::bail!("No input provided");
    }
    Ok(value)
}
