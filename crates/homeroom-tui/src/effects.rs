//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Validate any stored session and settle the startup state.
    Bootstrap,

    /// Submit a sign-in attempt.
    SubmitLogin { email: String, password: String },

    /// Submit the forced password change for a first-time sign-in.
    SubmitPasswordChange {
        email: String,
        current_password: String,
        new_password: String,
        confirm_password: String,
    },

    /// Submit an emailed-token password reset.
    SubmitTokenReset {
        token: String,
        email: String,
        new_password: String,
        confirm_password: String,
    },

    /// Ask the backend to email a reset link.
    SubmitResetRequest { email: String },

    /// Sign out locally (delete the session file, no network).
    Logout,

    /// Start the lockout countdown timer. Replaces any running timer.
    StartLockout { seconds: u32 },

    /// Cancel the lockout countdown timer, if one is running.
    CancelLockout,
}
