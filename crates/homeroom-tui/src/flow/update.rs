//! Reducer for the sign-in gate.
//!
//! `handle_key` edits the active form and emits submit effects;
//! `apply_flow_event` folds async results back into the flow. All flow
//! transitions happen in this module, so the runtime never has to know
//! which screen is active.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use homeroom_core::auth::{LoginOutcome, User, validate_new_password};

use super::state::{
    ChangePasswordForm, ForgotPasswordForm, LockReason, LoginField, LoginFlow, LoginForm,
    PasswordField, ResetPasswordForm,
};
use crate::effects::UiEffect;
use crate::events::FlowEvent;

const EMPTY_FIELDS_MESSAGE: &str = "Enter your email and password.";
const EMPTY_EMAIL_MESSAGE: &str = "Enter an email address.";
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";
const NETWORK_FAILURE_MESSAGE: &str = "Network error. Check your connection and try again.";
const PERMANENT_LOCK_MESSAGE: &str =
    "This account is permanently locked. Contact the school office.";
const ADMIN_LOCK_MESSAGE: &str =
    "This account has been locked by an administrator. Contact the school office.";
const PASSWORD_CHANGED_NOTICE: &str = "Password updated. Sign in with your new password.";
const PASSWORD_RESET_NOTICE: &str = "Password reset complete. Sign in with your new password.";
const RESET_LINK_NOTICE: &str = "If that email has an account, a reset link is on its way.";

/// What the gate asks the outer reducer to do after a flow event.
#[derive(Debug)]
pub enum GateAction {
    /// Keep showing the gate.
    Stay,
    /// Sign-in succeeded; show the home screen for this user.
    EnterHome(User),
    /// A lock expired; discard the gate and re-check the session.
    Reload,
}

/// Handles a key press on the active gate screen.
pub fn handle_key(flow: &mut LoginFlow, key: KeyEvent) -> Vec<UiEffect> {
    // Submissions are single-flight: a screen with a request in flight
    // ignores input until the result lands.
    if flow.is_submitting() {
        return vec![];
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match flow {
        LoginFlow::Login(form) => match key.code {
            KeyCode::Esc => vec![UiEffect::Quit],
            KeyCode::Char('f') if ctrl => {
                let email = form.email.clone();
                *flow = LoginFlow::forgot(email);
                vec![]
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
                form.focus = toggle_login_field(form.focus);
                vec![]
            }
            KeyCode::Enter => submit_login(form),
            KeyCode::Backspace => {
                login_field_mut(form).pop();
                vec![]
            }
            KeyCode::Char(c) if !ctrl => {
                login_field_mut(form).push(c);
                vec![]
            }
            _ => vec![],
        },
        LoginFlow::FirstTimePasswordChange(form) => match key.code {
            KeyCode::Esc => {
                // Abandoning the change means no session; back to sign-in.
                let email = form.email.clone();
                *flow = LoginFlow::login_with(email, None);
                vec![]
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
                form.focus = toggle_password_field(form.focus);
                vec![]
            }
            KeyCode::Enter => submit_password_change(form),
            KeyCode::Backspace => {
                change_field_mut(form).pop();
                vec![]
            }
            KeyCode::Char(c) if !ctrl => {
                change_field_mut(form).push(c);
                vec![]
            }
            _ => vec![],
        },
        LoginFlow::TokenPasswordReset(form) => match key.code {
            KeyCode::Esc => {
                let email = form.email.clone();
                *flow = LoginFlow::login_with(email, None);
                vec![]
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
                form.focus = toggle_password_field(form.focus);
                vec![]
            }
            KeyCode::Enter => submit_token_reset(form),
            KeyCode::Backspace => {
                reset_field_mut(form).pop();
                vec![]
            }
            KeyCode::Char(c) if !ctrl => {
                reset_field_mut(form).push(c);
                vec![]
            }
            _ => vec![],
        },
        LoginFlow::ForgotPassword(form) => match key.code {
            KeyCode::Esc => {
                let email = form.email.clone();
                *flow = LoginFlow::login_with(email, None);
                vec![]
            }
            KeyCode::Enter => submit_reset_request(form),
            KeyCode::Backspace => {
                form.email.pop();
                vec![]
            }
            KeyCode::Char(c) if !ctrl => {
                form.email.push(c);
                vec![]
            }
            _ => vec![],
        },
        LoginFlow::AccountLocked(locked) => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b') => {
                *flow = LoginFlow::login();
                vec![UiEffect::CancelLockout]
            }
            KeyCode::Char('u') => {
                // Local acknowledgement only; nothing is sent anywhere.
                if locked.can_request_unlock() {
                    locked.unlock_requested = true;
                }
                vec![]
            }
            _ => vec![],
        },
    }
}

/// Folds an async result into the flow.
pub fn apply_flow_event(flow: &mut LoginFlow, event: FlowEvent) -> (GateAction, Vec<UiEffect>) {
    match event {
        FlowEvent::LoginDone(outcome) => apply_login_outcome(flow, outcome),
        FlowEvent::LoginPersistFailed { error } => {
            if let LoginFlow::Login(form) = flow {
                form.submitting = false;
                form.error = Some(format!(
                    "Signed in, but the session could not be saved: {error}"
                ));
            }
            (GateAction::Stay, vec![])
        }
        FlowEvent::PasswordChangeDone(result) => {
            let LoginFlow::FirstTimePasswordChange(form) = flow else {
                return (GateAction::Stay, vec![]);
            };
            match result {
                Ok(()) => {
                    let email = form.email.clone();
                    *flow = LoginFlow::login_with(email, Some(PASSWORD_CHANGED_NOTICE.to_string()));
                }
                Err(err) => {
                    form.submitting = false;
                    form.error = Some(err.to_string());
                }
            }
            (GateAction::Stay, vec![])
        }
        FlowEvent::TokenResetDone(result) => {
            let LoginFlow::TokenPasswordReset(form) = flow else {
                return (GateAction::Stay, vec![]);
            };
            match result {
                Ok(()) => {
                    let email = form.email.clone();
                    *flow = LoginFlow::login_with(email, Some(PASSWORD_RESET_NOTICE.to_string()));
                }
                Err(err) => {
                    form.submitting = false;
                    form.error = Some(err.to_string());
                }
            }
            (GateAction::Stay, vec![])
        }
        FlowEvent::ResetRequestDone(result) => {
            if let LoginFlow::ForgotPassword(form) = flow {
                form.submitting = false;
                match result {
                    Ok(()) => {
                        form.error = None;
                        form.notice = Some(RESET_LINK_NOTICE.to_string());
                    }
                    Err(err) => form.error = Some(err.to_string()),
                }
            }
            (GateAction::Stay, vec![])
        }
        FlowEvent::LockoutTick { remaining } => {
            // The displayed countdown only ever decreases; a stale or
            // duplicated tick can never push it back up.
            if let LoginFlow::AccountLocked(locked) = flow
                && locked.reason == LockReason::Temporary
                && locked.countdown.is_none_or(|current| remaining < current)
            {
                locked.countdown = Some(remaining);
            }
            (GateAction::Stay, vec![])
        }
        FlowEvent::LockoutExpired => {
            if matches!(flow, LoginFlow::AccountLocked(locked) if locked.reason == LockReason::Temporary)
            {
                (GateAction::Reload, vec![UiEffect::CancelLockout])
            } else {
                (GateAction::Stay, vec![])
            }
        }
    }
}

fn apply_login_outcome(flow: &mut LoginFlow, outcome: LoginOutcome) -> (GateAction, Vec<UiEffect>) {
    let LoginFlow::Login(form) = flow else {
        return (GateAction::Stay, vec![]);
    };
    form.submitting = false;

    match outcome {
        LoginOutcome::Authenticated(session) => (GateAction::EnterHome(session.user), vec![]),
        LoginOutcome::FirstTimeLoginRequired => {
            let email = form.email.trim().to_string();
            let password = form.password.clone();
            *flow = LoginFlow::first_time(email, password);
            (GateAction::Stay, vec![])
        }
        LoginOutcome::InvalidCredentials { attempts_remaining } => {
            form.password.clear();
            form.focus = LoginField::Password;
            form.error = Some(invalid_credentials_message(attempts_remaining));
            (GateAction::Stay, vec![])
        }
        LoginOutcome::TemporaryLocked {
            remaining_seconds,
            message,
            ..
        } => {
            *flow = LoginFlow::locked(LockReason::Temporary, message, Some(remaining_seconds));
            (
                GateAction::Stay,
                vec![UiEffect::StartLockout {
                    seconds: remaining_seconds,
                }],
            )
        }
        LoginOutcome::PermanentlyLocked => {
            *flow = LoginFlow::locked(LockReason::Permanent, PERMANENT_LOCK_MESSAGE.to_string(), None);
            (GateAction::Stay, vec![])
        }
        LoginOutcome::AdminLocked => {
            *flow = LoginFlow::locked(LockReason::Admin, ADMIN_LOCK_MESSAGE.to_string(), None);
            (GateAction::Stay, vec![])
        }
        LoginOutcome::NetworkFailure => {
            form.error = Some(NETWORK_FAILURE_MESSAGE.to_string());
            (GateAction::Stay, vec![])
        }
    }
}

fn invalid_credentials_message(attempts_remaining: Option<u32>) -> String {
    match attempts_remaining {
        Some(1) => format!("{INVALID_CREDENTIALS_MESSAGE} 1 attempt remaining."),
        Some(n) => format!("{INVALID_CREDENTIALS_MESSAGE} {n} attempts remaining."),
        None => INVALID_CREDENTIALS_MESSAGE.to_string(),
    }
}

fn submit_login(form: &mut LoginForm) -> Vec<UiEffect> {
    let email = form.email.trim().to_string();
    if email.is_empty() || form.password.is_empty() {
        form.error = Some(EMPTY_FIELDS_MESSAGE.to_string());
        return vec![];
    }
    form.error = None;
    form.notice = None;
    form.submitting = true;
    vec![UiEffect::SubmitLogin {
        email,
        password: form.password.clone(),
    }]
}

fn submit_password_change(form: &mut ChangePasswordForm) -> Vec<UiEffect> {
    if let Err(violation) = validate_new_password(&form.new_password, &form.confirm_password) {
        form.error = Some(violation.message().to_string());
        return vec![];
    }
    form.error = None;
    form.submitting = true;
    vec![UiEffect::SubmitPasswordChange {
        email: form.email.clone(),
        current_password: form.current_password.clone(),
        new_password: form.new_password.clone(),
        confirm_password: form.confirm_password.clone(),
    }]
}

fn submit_token_reset(form: &mut ResetPasswordForm) -> Vec<UiEffect> {
    if let Err(violation) = validate_new_password(&form.new_password, &form.confirm_password) {
        form.error = Some(violation.message().to_string());
        return vec![];
    }
    form.error = None;
    form.submitting = true;
    vec![UiEffect::SubmitTokenReset {
        token: form.token.clone(),
        email: form.email.clone(),
        new_password: form.new_password.clone(),
        confirm_password: form.confirm_password.clone(),
    }]
}

fn submit_reset_request(form: &mut ForgotPasswordForm) -> Vec<UiEffect> {
    let email = form.email.trim().to_string();
    if email.is_empty() {
        form.error = Some(EMPTY_EMAIL_MESSAGE.to_string());
        return vec![];
    }
    form.error = None;
    form.notice = None;
    form.submitting = true;
    vec![UiEffect::SubmitResetRequest { email }]
}

fn toggle_login_field(focus: LoginField) -> LoginField {
    match focus {
        LoginField::Email => LoginField::Password,
        LoginField::Password => LoginField::Email,
    }
}

fn toggle_password_field(focus: PasswordField) -> PasswordField {
    match focus {
        PasswordField::New => PasswordField::Confirm,
        PasswordField::Confirm => PasswordField::New,
    }
}

fn login_field_mut(form: &mut LoginForm) -> &mut String {
    match form.focus {
        LoginField::Email => &mut form.email,
        LoginField::Password => &mut form.password,
    }
}

fn change_field_mut(form: &mut ChangePasswordForm) -> &mut String {
    match form.focus {
        PasswordField::New => &mut form.new_password,
        PasswordField::Confirm => &mut form.confirm_password,
    }
}

fn reset_field_mut(form: &mut ResetPasswordForm) -> &mut String {
    match form.focus {
        PasswordField::New => &mut form.new_password,
        PasswordField::Confirm => &mut form.confirm_password,
    }
}
