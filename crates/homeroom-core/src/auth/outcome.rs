//! Typed outcomes for authentication and password operations.

use std::fmt;

use chrono::{DateTime, Utc};

use super::types::Session;

/// Classified result of a login attempt.
///
/// Exactly one variant applies per attempt. Transport failure is an
/// outcome rather than an error so callers handle every case in a
/// single match.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Credentials accepted and a session issued.
    Authenticated(Session),
    /// Credentials valid but the password must be changed before a
    /// session is granted.
    FirstTimeLoginRequired,
    /// Credentials rejected, with the backend's remaining-attempts hint
    /// when it sends one.
    InvalidCredentials { attempts_remaining: Option<u32> },
    /// Account locked until a point in time or for a duration.
    /// `locked_until` is `None` when the backend reported only a
    /// remaining duration.
    TemporaryLocked {
        locked_until: Option<DateTime<Utc>>,
        remaining_seconds: u32,
        message: String,
    },
    /// Account locked for good; only an administrator can intervene.
    PermanentlyLocked,
    /// Account locked manually by an administrator.
    AdminLocked,
    /// The backend could not be reached or answered unintelligibly.
    NetworkFailure,
}

/// Failure modes of the password endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// Re-authentication with the current password failed
    /// (change-password path only).
    CurrentPasswordIncorrect,
    /// The reset token was rejected by the backend (token-reset path).
    TokenInvalidOrExpired { message: String },
    /// The backend rejected the request with an error message.
    Rejected { message: String },
    /// The backend could not be reached.
    Network,
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordError::CurrentPasswordIncorrect => {
                write!(f, "Current password is incorrect.")
            }
            PasswordError::TokenInvalidOrExpired { message }
            | PasswordError::Rejected { message } => write!(f, "{message}"),
            PasswordError::Network => {
                write!(f, "Network error. Check your connection and try again.")
            }
        }
    }
}
