//! Top-level application state.

use homeroom_core::auth::ResetRequest;

use crate::flow::LoginFlow;
use crate::home::HomeState;

/// Which screen owns the terminal.
#[derive(Debug)]
pub enum Screen {
    /// Checking the stored session; no input accepted yet.
    Booting,
    /// Pre-authentication flow (sign-in and its satellite screens).
    Gate(LoginFlow),
    /// Signed-in area.
    Home(HomeState),
}

/// Complete state of the console.
///
/// Mutated only by `update`; rendering borrows it immutably.
#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub school_name: Option<String>,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    /// Starts at the boot screen; the runtime kicks off the session check.
    pub fn new(school_name: Option<String>) -> Self {
        Self {
            screen: Screen::Booting,
            school_name,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    /// Starts directly on the reset-password screen.
    ///
    /// Used when a reset link's token and email arrive on the command
    /// line; the stored-session check is skipped so the reset cannot be
    /// shadowed by an existing session.
    pub fn new_with_reset(school_name: Option<String>, request: ResetRequest) -> Self {
        Self {
            screen: Screen::Gate(LoginFlow::token_reset(request)),
            school_name,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    /// Flow state, if the gate is on screen.
    pub fn flow(&self) -> Option<&LoginFlow> {
        match &self.screen {
            Screen::Gate(flow) => Some(flow),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: the default entry point boots into the session check.
    #[test]
    fn test_new_starts_booting() {
        let app = AppState::new(Some("Brookfield Primary".to_string()));
        assert!(matches!(app.screen, Screen::Booting));
        assert!(!app.should_quit);
    }

    /// Test: a reset link opens the reset screen without a session check.
    #[test]
    fn test_reset_entry_skips_boot() {
        let app = AppState::new_with_reset(
            None,
            ResetRequest {
                token: "reset-abc123".to_string(),
                email: "head@brookfield.test".to_string(),
            },
        );
        match app.flow() {
            Some(LoginFlow::TokenPasswordReset(form)) => {
                assert_eq!(form.token, "reset-abc123");
                assert_eq!(form.email, "head@brookfield.test");
            }
            other => panic!("expected token reset screen, got {other:?}"),
        }
    }
}
