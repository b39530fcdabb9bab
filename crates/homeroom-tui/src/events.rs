//! UI event types.
//!
//! All external inputs (terminal, async auth results, the lockout timer)
//! are converted to `UiEvent` before being processed by the reducer.
//!
//! ## Inbox Pattern
//!
//! Async operations send events directly to the runtime's event inbox.
//! Results arrive as separate events; the reducer is the only place that
//! mutates state in response.

use crossterm::event::Event as CrosstermEvent;
use homeroom_core::auth::{LoginOutcome, PasswordError, SessionState};

/// Unified event enum for the console.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (spinner animation, render cadence).
    Tick,
    /// Raw terminal input.
    Terminal(CrosstermEvent),
    /// Startup session validation settled (authenticated or anonymous).
    SessionSettled(SessionState),
    /// Startup session validation failed on local I/O.
    BootstrapFailed { error: String },
    /// Local sign-out finished. `Ok(removed)` tells whether a session
    /// file actually existed.
    LoggedOut { result: Result<bool, String> },
    /// A sign-in gate result.
    Flow(FlowEvent),
}

/// Results flowing back into the sign-in gate.
#[derive(Debug)]
pub enum FlowEvent {
    /// The sign-in attempt was classified.
    LoginDone(LoginOutcome),
    /// The backend granted a session but it could not be persisted.
    LoginPersistFailed { error: String },
    /// The forced password change finished.
    PasswordChangeDone(Result<(), PasswordError>),
    /// The emailed-token reset finished.
    TokenResetDone(Result<(), PasswordError>),
    /// The reset-link request finished.
    ResetRequestDone(Result<(), PasswordError>),
    /// One second of a temporary lock elapsed.
    LockoutTick { remaining: u32 },
    /// A temporary lock ran out; the session must be re-checked.
    LockoutExpired,
}
