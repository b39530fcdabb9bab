//! Orchestration over the auth client and the session store.
//!
//! `AuthService` is the single entrypoint the UI drives: it owns the
//! `SessionStore`, so every session grant and clear funnels through one
//! place, and the backend client stays free of storage concerns.

use anyhow::Result;
use tracing::info;

use super::client::AuthClient;
use super::outcome::{LoginOutcome, PasswordError};
use super::session::{SessionState, SessionStore};
use super::types::User;

/// Auth façade: classification from the client, persistence in the store.
pub struct AuthService {
    client: AuthClient,
    store: SessionStore,
}

impl AuthService {
    /// Creates a service over an existing client and store.
    pub fn new(client: AuthClient, store: SessionStore) -> Self {
        Self { client, store }
    }

    /// Settles the stored session at startup. Must complete before any
    /// gate-or-home routing decision.
    ///
    /// # Errors
    /// Returns an error if the session file cannot be read or deleted.
    pub async fn bootstrap(&mut self) -> Result<&SessionState> {
        self.store.bootstrap(&self.client).await
    }

    /// Attempts a sign-in. A granted session is persisted before the
    /// outcome is returned; all other outcomes leave the session
    /// untouched, including `FirstTimeLoginRequired`, which deliberately
    /// grants nothing until the password has been changed and a fresh
    /// sign-in succeeds.
    ///
    /// # Errors
    /// Returns an error if a granted session cannot be persisted.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<LoginOutcome> {
        let outcome = self.client.login(email, password).await;
        if let LoginOutcome::Authenticated(session) = &outcome {
            self.store.set(session.clone())?;
            info!(user = %session.user.email, "signed in");
        }
        Ok(outcome)
    }

    /// Signs out locally without contacting the backend.
    ///
    /// # Errors
    /// Returns an error if the session file cannot be deleted.
    pub fn logout(&mut self) -> Result<bool> {
        info!("signed out");
        self.store.clear()
    }

    /// Changes the password for `email`, verifying `old_password` first.
    ///
    /// # Errors
    /// Returns a `PasswordError` describing why the backend refused.
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), PasswordError> {
        self.client
            .change_password(email, old_password, new_password, confirm_password)
            .await
    }

    /// Completes an emailed password reset.
    ///
    /// # Errors
    /// Returns a `PasswordError` describing why the backend refused.
    pub async fn reset_password_with_token(
        &self,
        token: &str,
        email: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), PasswordError> {
        self.client
            .reset_password_with_token(token, email, new_password, confirm_password)
            .await
    }

    /// Asks the backend to email a reset link.
    ///
    /// # Errors
    /// Returns a `PasswordError` describing why the backend refused.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), PasswordError> {
        self.client.request_password_reset(email).await
    }

    /// The current lifecycle state.
    pub fn session_state(&self) -> &SessionState {
        self.store.state()
    }

    /// True until `bootstrap` has settled the stored session.
    pub fn is_loading(&self) -> bool {
        self.store.state().is_loading()
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.store.state().user()
    }
}
