//! Session token storage and the session lifecycle.
//!
//! Stores the bearer token in `<home>/session.json` with restricted
//! permissions (0600). Tokens are never logged or displayed in full.
//!
//! `SessionStore` is the only reader and writer of that file; everything
//! else observes sessions through `SessionState`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::client::AuthClient;
use super::types::{Session, User};
use crate::config::paths;

/// Session file name under the homeroom home directory.
const SESSION_FILE: &str = "session.json";

/// On-disk shape of the session file. Only the token is persisted; the
/// user profile is re-fetched on every startup so stale roles or names
/// never survive a restart.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Where the app currently stands with respect to authentication.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// Startup has not looked at the session file yet.
    #[default]
    Uninitialized,
    /// The stored token (if any) is being validated.
    Loading,
    /// A validated session; the gated UI may be shown.
    Authenticated(Session),
    /// No session. The sign-in gate owns the screen.
    Anonymous,
}

impl SessionState {
    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(session) => Some(&session.user),
            _ => None,
        }
    }

    /// True until startup validation has settled the state. Callers must
    /// not route to the gate or the gated UI while this holds.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Loading)
    }
}

/// Owner of the persisted session and its in-memory state.
pub struct SessionStore {
    path: PathBuf,
    state: SessionState,
}

impl SessionStore {
    /// Creates a store over the default session file location.
    pub fn new() -> Self {
        Self::at(paths::session_path())
    }

    /// Creates a store over an explicit session file path.
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            state: SessionState::Uninitialized,
        }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Validates any stored token and settles the state to either
    /// `Authenticated` or `Anonymous`.
    ///
    /// A rejected token is deleted silently; the user simply sees the
    /// sign-in gate. Runs the validation request at most once per call
    /// and makes no request when no token is stored.
    ///
    /// # Errors
    /// Returns an error if the session file exists but cannot be read
    /// or deleted. Backend rejection is not an error.
    pub async fn bootstrap(&mut self, client: &AuthClient) -> Result<&SessionState> {
        self.state = SessionState::Loading;

        let Some(token) = self.read_token()? else {
            self.state = SessionState::Anonymous;
            return Ok(&self.state);
        };

        match client.fetch_current_user(&token).await {
            Some(user) => {
                info!(user = %user.email, "session restored");
                self.state = SessionState::Authenticated(Session { token, user });
            }
            None => {
                debug!(token = %mask_token(&token), "stored token rejected, clearing session");
                self.remove_file()?;
                self.state = SessionState::Anonymous;
            }
        }
        Ok(&self.state)
    }

    /// Installs a session: persists the token, then updates memory.
    ///
    /// # Errors
    /// Returns an error if the token cannot be written; in that case the
    /// in-memory state is left unchanged.
    pub fn set(&mut self, session: Session) -> Result<()> {
        self.write_token(&session.token)?;
        self.state = SessionState::Authenticated(session);
        Ok(())
    }

    /// Signs out locally: deletes the session file and becomes
    /// `Anonymous`. Never talks to the backend, so it works offline.
    ///
    /// # Errors
    /// Returns an error if the session file exists but cannot be deleted.
    pub fn clear(&mut self) -> Result<bool> {
        let removed = self.remove_file()?;
        self.state = SessionState::Anonymous;
        Ok(removed)
    }

    /// Reads the stored token, if any.
    ///
    /// An unreadable or malformed session file is treated as signed out
    /// rather than a fatal error, so a damaged file never wedges startup.
    fn read_token(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file {}", self.path.display()))?;

        match serde_json::from_str::<StoredSession>(&contents) {
            Ok(stored) if stored.token.is_empty() => Ok(None),
            Ok(stored) => Ok(Some(stored.token)),
            Err(err) => {
                warn!(error = %err, "unreadable session file, treating as signed out");
                Ok(None)
            }
        }
    }

    /// Writes the token with restricted permissions (0600).
    fn write_token(&self, token: &str) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(&StoredSession {
            token: token.to_string(),
        })
        .context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    fn remove_file(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to delete session file {}", self.path.display()))?;
        Ok(true)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Masks a token for display (shows first 12 chars).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 {
        "***".to_string()
    } else {
        format!("{}...", &token[..12])
    }
}
