//! Effect handler implementations.
//!
//! Pure async functions. The runtime spawns them and forwards the
//! returned event to the inbox; nothing here touches app state.

use crate::events::{FlowEvent, UiEvent};
use crate::runtime::SharedAuth;

/// Validates any stored session against the backend.
pub async fn bootstrap(auth: SharedAuth) -> UiEvent {
    let mut auth = auth.lock().await;
    match auth.bootstrap().await {
        Ok(state) => UiEvent::SessionSettled(state.clone()),
        Err(error) => UiEvent::BootstrapFailed {
            error: error.to_string(),
        },
    }
}

/// Runs a sign-in attempt and persists the session on success.
pub async fn submit_login(auth: SharedAuth, email: String, password: String) -> UiEvent {
    let mut auth = auth.lock().await;
    match auth.login(&email, &password).await {
        Ok(outcome) => UiEvent::Flow(FlowEvent::LoginDone(outcome)),
        // Sign-in itself succeeded; only writing the session file failed.
        Err(error) => UiEvent::Flow(FlowEvent::LoginPersistFailed {
            error: error.to_string(),
        }),
    }
}

/// Performs the forced password change of a first-time sign-in.
pub async fn change_password(
    auth: SharedAuth,
    email: String,
    current_password: String,
    new_password: String,
    confirm_password: String,
) -> UiEvent {
    let auth = auth.lock().await;
    let result = auth
        .change_password(&email, &current_password, &new_password, &confirm_password)
        .await;
    UiEvent::Flow(FlowEvent::PasswordChangeDone(result))
}

/// Completes an emailed password reset.
pub async fn reset_with_token(
    auth: SharedAuth,
    token: String,
    email: String,
    new_password: String,
    confirm_password: String,
) -> UiEvent {
    let auth = auth.lock().await;
    let result = auth
        .reset_password_with_token(&token, &email, &new_password, &confirm_password)
        .await;
    UiEvent::Flow(FlowEvent::TokenResetDone(result))
}

/// Asks the backend to email a reset link.
pub async fn request_reset(auth: SharedAuth, email: String) -> UiEvent {
    let auth = auth.lock().await;
    let result = auth.request_password_reset(&email).await;
    UiEvent::Flow(FlowEvent::ResetRequestDone(result))
}

/// Deletes the local session. Works offline.
pub async fn logout(auth: SharedAuth) -> UiEvent {
    let mut auth = auth.lock().await;
    let result = auth.logout().map_err(|error| error.to_string());
    UiEvent::LoggedOut { result }
}
