//! Pure reducer: `update(app, event) -> effects`.
//!
//! All state transitions happen here. The runtime feeds events in and
//! executes the returned effects; nothing in this module touches the
//! terminal or the network.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use homeroom_core::auth::SessionState;

use crate::effects::UiEffect;
use crate::events::{FlowEvent, UiEvent};
use crate::flow::{self, GateAction, LoginFlow};
use crate::flow::state::LoginForm;
use crate::home::{self, HomeState};
use crate::state::{AppState, Screen};

/// Applies one event to the app state and returns the effects to run.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, &event),
        UiEvent::SessionSettled(state) => handle_session_settled(app, state),
        UiEvent::BootstrapFailed { error } => {
            // The console stays usable; the stored session is simply not
            // trusted and a fresh sign-in is required.
            app.screen = Screen::Gate(LoginFlow::Login(LoginForm {
                error: Some(format!("Could not check the stored session: {error}")),
                ..LoginForm::default()
            }));
            vec![]
        }
        UiEvent::LoggedOut { result } => handle_logged_out(app, result),
        UiEvent::Flow(event) => handle_flow_event(app, event),
    }
}

fn handle_terminal_event(app: &mut AppState, event: &Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return vec![];
    };
    if key.kind != KeyEventKind::Press {
        return vec![];
    }
    if is_ctrl_c(key) {
        return vec![UiEffect::Quit];
    }
    match &mut app.screen {
        Screen::Booting => vec![],
        Screen::Gate(flow) => flow::update::handle_key(flow, *key),
        Screen::Home(home) => home::handle_key(home, *key),
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_session_settled(app: &mut AppState, state: SessionState) -> Vec<UiEffect> {
    match state {
        SessionState::Authenticated(session) => {
            app.screen = Screen::Home(HomeState::new(session.user));
        }
        _ => {
            app.screen = Screen::Gate(LoginFlow::login());
        }
    }
    vec![]
}

fn handle_logged_out(app: &mut AppState, result: Result<bool, String>) -> Vec<UiEffect> {
    match result {
        Ok(_) => {
            app.screen = Screen::Gate(LoginFlow::login_with(
                String::new(),
                Some("Signed out.".to_string()),
            ));
        }
        Err(error) => {
            app.screen = Screen::Gate(LoginFlow::Login(LoginForm {
                error: Some(format!("Sign-out failed: {error}")),
                ..LoginForm::default()
            }));
        }
    }
    vec![]
}

fn handle_flow_event(app: &mut AppState, event: FlowEvent) -> Vec<UiEffect> {
    // Results for a screen that is no longer up are stale; drop them.
    let Screen::Gate(flow) = &mut app.screen else {
        return vec![];
    };
    let (action, mut effects) = flow::update::apply_flow_event(flow, event);
    match action {
        GateAction::Stay => {}
        GateAction::EnterHome(user) => {
            app.screen = Screen::Home(HomeState::new(user));
        }
        GateAction::Reload => {
            app.screen = Screen::Booting;
            effects.push(UiEffect::Bootstrap);
        }
    }
    effects
}
