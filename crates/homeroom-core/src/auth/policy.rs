//! Password policy shared by the first-time-change and token-reset paths.
//!
//! Checks run before any network call; a violation never leaves the
//! process.

use std::fmt;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Symbol characters that satisfy the policy.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:'\",.<>/?`~|\\";

/// A password-policy check failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    /// New and confirm fields differ.
    Mismatch,
    /// Fewer than `MIN_PASSWORD_LEN` characters.
    TooShort,
    /// No character from `PASSWORD_SYMBOLS`.
    MissingSymbol,
}

impl PolicyViolation {
    /// Returns the user-facing message for this violation.
    pub fn message(self) -> &'static str {
        match self {
            PolicyViolation::Mismatch => "Passwords do not match.",
            PolicyViolation::TooShort => "Password must be at least 8 characters long.",
            PolicyViolation::MissingSymbol => {
                "Password must contain at least one symbol character (e.g. ! @ # $ %)."
            }
        }
    }
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Validates a new password and its confirmation.
///
/// Checks run in order: field match, then length, then symbol content.
/// Length counts characters, not bytes; the match is byte-for-byte.
pub fn validate_new_password(
    new_password: &str,
    confirm_password: &str,
) -> Result<(), PolicyViolation> {
    if new_password != confirm_password {
        return Err(PolicyViolation::Mismatch);
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PolicyViolation::TooShort);
    }
    if !new_password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Err(PolicyViolation::MissingSymbol);
    }
    Ok(())
}
