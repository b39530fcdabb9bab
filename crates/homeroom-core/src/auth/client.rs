//! HTTP adapter for the school CMS auth endpoints.
//!
//! Classifies raw backend responses into `LoginOutcome` / `PasswordError`
//! values. Stateless: it never touches persisted storage, and a failed
//! call leaves nothing behind.

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::outcome::{LoginOutcome, PasswordError};
use super::types::{Session, User};
use crate::config::Config;

/// Base URL the default config ships with (the backend dev server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

const LOGIN_PATH: &str = "/auth/login";
const CHANGE_PASSWORD_PATH: &str = "/auth/change-password";
const RESET_PASSWORD_PATH: &str = "/auth/reset-password";
const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
const ME_PATH: &str = "/auth/me";

const LOCKED_UNTIL_MESSAGE: &str =
    "Your account is temporarily locked. It unlocks automatically when the countdown ends.";
const LOCKED_RETRY_MESSAGE: &str =
    "Too many failed sign-in attempts. Your account is locked for a short while.";
const LOCKED_FALLBACK_MESSAGE: &str = "Your account is locked. Contact an administrator.";
const RESET_TOKEN_MESSAGE: &str = "This reset link is invalid or has expired. Request a new one.";
const CHANGE_REJECTED_MESSAGE: &str = "The password change was rejected by the server.";
const FORGOT_REJECTED_MESSAGE: &str = "Could not request a reset link. Try again later.";

/// Auth API client.
pub struct AuthClient {
    base_url: String,
    timeout: Option<Duration>,
    http: reqwest::Client,
}

impl AuthClient {
    /// Creates a client for the configured backend.
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if `base_url` is the
    ///   shipped default.
    /// - At runtime, panics if `HOMEROOM_BLOCK_REAL_API=1` and `base_url`
    ///   is the shipped default.
    ///
    /// This prevents tests from accidentally making real network requests.
    /// Point tests at a mock server (e.g., wiremock) via `HOMEROOM_API_URL`.
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_base_url, config.request_timeout())
    }

    /// Creates a client against an explicit base URL.
    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> Self {
        // Compile-time guard for unit tests
        #[cfg(test)]
        if base_url == DEFAULT_BASE_URL {
            panic!(
                "Tests must not use the default backend URL!\n\
                 Point the client at a mock server (e.g., wiremock).\n\
                 Found base_url: {base_url}"
            );
        }

        // Runtime guard for integration tests (set HOMEROOM_BLOCK_REAL_API=1 in test harness)
        #[cfg(not(test))]
        if std::env::var("HOMEROOM_BLOCK_REAL_API").is_ok_and(|v| v == "1")
            && base_url == DEFAULT_BASE_URL
        {
            panic!(
                "HOMEROOM_BLOCK_REAL_API=1 but trying to use the default backend URL!\n\
                 Set HOMEROOM_API_URL to a mock server.\n\
                 Found base_url: {base_url}"
            );
        }

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            http: reqwest::Client::new(),
        }
    }

    /// Attempts a sign-in and classifies the backend's answer.
    ///
    /// Transport failures and unintelligible responses come back as
    /// `LoginOutcome::NetworkFailure`; this method never errors.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        match self.post_login(email, password).await {
            Ok(LoginReply::Issued(response)) => {
                if response.first_time_login {
                    debug!(email, "login accepted, password change required");
                    LoginOutcome::FirstTimeLoginRequired
                } else {
                    debug!(email, "login accepted");
                    LoginOutcome::Authenticated(Session {
                        token: response.token,
                        user: response.user,
                    })
                }
            }
            Ok(LoginReply::Unauthorized(body)) => LoginOutcome::InvalidCredentials {
                attempts_remaining: body.attempts_remaining,
            },
            Ok(LoginReply::Locked(body)) => map_locked(&body, Utc::now()),
            Err(err) => {
                warn!(error = %err, "login request failed");
                LoginOutcome::NetworkFailure
            }
        }
    }

    /// Changes a password, re-authenticating with the current one first.
    ///
    /// The backend has no dedicated verify-current-password endpoint, so
    /// this calls the login endpoint with `old_password` as its explicit
    /// precondition; a rejected re-authentication surfaces as
    /// `CurrentPasswordIncorrect`. The re-auth response also supplies the
    /// user id the change endpoint requires. No session is granted or
    /// stored by this call.
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), PasswordError> {
        let reply = self.post_login(email, old_password).await.map_err(|err| {
            warn!(error = %err, "re-authentication request failed");
            PasswordError::Network
        })?;
        let user_id = match reply {
            LoginReply::Issued(response) => response.user.id,
            LoginReply::Unauthorized(_) => return Err(PasswordError::CurrentPasswordIncorrect),
            LoginReply::Locked(body) => {
                return Err(PasswordError::Rejected {
                    message: body
                        .message
                        .unwrap_or_else(|| LOCKED_FALLBACK_MESSAGE.to_string()),
                });
            }
        };

        let response = self
            .post(CHANGE_PASSWORD_PATH)
            .json(&ChangePasswordRequest {
                user_id: &user_id,
                old_password,
                new_password,
                confirm_password,
            })
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "change-password request failed");
                PasswordError::Network
            })?;

        match response.status() {
            status if status.is_success() => Ok(()),
            status if status.is_client_error() => {
                let body = response.json::<ErrorResponse>().await.unwrap_or_default();
                Err(PasswordError::Rejected {
                    message: body
                        .error
                        .unwrap_or_else(|| CHANGE_REJECTED_MESSAGE.to_string()),
                })
            }
            status => {
                warn!(%status, "change-password failed");
                Err(PasswordError::Network)
            }
        }
    }

    /// Completes a password reset issued via an emailed token.
    pub async fn reset_password_with_token(
        &self,
        token: &str,
        email: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), PasswordError> {
        let response = self
            .post(RESET_PASSWORD_PATH)
            .json(&ResetPasswordRequest {
                token,
                email,
                new_password,
                confirm_password,
            })
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "reset-password request failed");
                PasswordError::Network
            })?;

        match response.status() {
            status if status.is_success() => Ok(()),
            status if status.is_client_error() => {
                // Local validation already filtered malformed passwords,
                // so a 4xx here means the token was rejected.
                let body = response.json::<ErrorResponse>().await.unwrap_or_default();
                Err(PasswordError::TokenInvalidOrExpired {
                    message: body
                        .error
                        .unwrap_or_else(|| RESET_TOKEN_MESSAGE.to_string()),
                })
            }
            status => {
                warn!(%status, "reset-password failed");
                Err(PasswordError::Network)
            }
        }
    }

    /// Asks the backend to email a reset link.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), PasswordError> {
        let response = self
            .post(FORGOT_PASSWORD_PATH)
            .json(&ForgotPasswordRequest { email })
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "forgot-password request failed");
                PasswordError::Network
            })?;

        match response.status() {
            status if status.is_success() => Ok(()),
            status if status.is_client_error() => {
                let body = response.json::<ErrorResponse>().await.unwrap_or_default();
                Err(PasswordError::Rejected {
                    message: body
                        .error
                        .unwrap_or_else(|| FORGOT_REJECTED_MESSAGE.to_string()),
                })
            }
            status => {
                warn!(%status, "forgot-password failed");
                Err(PasswordError::Network)
            }
        }
    }

    /// Validates a bearer token by fetching the account behind it.
    ///
    /// Any non-success response, transport failure, or unreadable body
    /// yields `None`; the caller treats `None` as "token invalid".
    pub async fn fetch_current_user(&self, token: &str) -> Option<User> {
        let response = match self.get(ME_PATH).bearer_auth(token).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "session validation request failed");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!(status = %response.status(), "stored token rejected");
            return None;
        }

        match response.json::<MeResponse>().await {
            Ok(me) => Some(me.user),
            Err(err) => {
                warn!(error = %err, "unreadable account payload");
                None
            }
        }
    }

    /// Raw POST /auth/login status classification, shared by `login` and
    /// the change-password re-authentication step (which needs the user
    /// id even when `firstTimeLogin` is set).
    async fn post_login(&self, email: &str, password: &str) -> Result<LoginReply> {
        let response = self
            .post(LOGIN_PATH)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(LoginReply::Issued(response.json().await?)),
            StatusCode::UNAUTHORIZED => Ok(LoginReply::Unauthorized(
                response.json::<ErrorResponse>().await.unwrap_or_default(),
            )),
            StatusCode::LOCKED => Ok(LoginReply::Locked(
                response.json::<LockedResponse>().await.unwrap_or_default(),
            )),
            status => anyhow::bail!("login returned unexpected status {status}"),
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_timeout(self.http.post(self.url(path)))
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_timeout(self.http.get(self.url(path)))
    }

    fn with_timeout(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

enum LoginReply {
    Issued(LoginResponse),
    Unauthorized(ErrorResponse),
    Locked(LockedResponse),
}

/// Classifies a 423 body into the lock outcome.
///
/// Order matters: a permanent flag beats everything, a concrete unlock
/// time beats a bare duration, and anything else needs an administrator.
/// When both `lockedUntil` and `remainingTime` are present the explicit
/// duration wins, so the displayed countdown starts at exactly the value
/// the backend computed.
fn map_locked(body: &LockedResponse, now: DateTime<Utc>) -> LoginOutcome {
    if body.permanently_locked {
        return LoginOutcome::PermanentlyLocked;
    }

    if let Some(locked_until) = body.locked_until {
        let remaining = body
            .remaining_time
            .unwrap_or_else(|| (locked_until - now).num_seconds());
        return LoginOutcome::TemporaryLocked {
            locked_until: Some(locked_until),
            remaining_seconds: clamp_seconds(remaining),
            message: body
                .message
                .clone()
                .unwrap_or_else(|| LOCKED_UNTIL_MESSAGE.to_string()),
        };
    }

    if let Some(remaining) = body.remaining_time {
        return LoginOutcome::TemporaryLocked {
            locked_until: None,
            remaining_seconds: clamp_seconds(remaining),
            message: body
                .message
                .clone()
                .unwrap_or_else(|| LOCKED_RETRY_MESSAGE.to_string()),
        };
    }

    debug!(
        admin_locked = body.account_locked,
        "account locked without unlock schedule"
    );
    LoginOutcome::AdminLocked
}

/// Countdowns are display state; negative values clamp to zero.
fn clamp_seconds(seconds: i64) -> u32 {
    u32::try_from(seconds.clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX)
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    user_id: &'a str,
    old_password: &'a str,
    new_password: &'a str,
    confirm_password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    email: &'a str,
    new_password: &'a str,
    confirm_password: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    user: User,
    token: String,
    #[serde(default)]
    first_time_login: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    attempts_remaining: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LockedResponse {
    #[serde(default)]
    permanently_locked: bool,
    #[serde(default)]
    account_locked: bool,
    #[serde(default)]
    locked_until: Option<DateTime<Utc>>,
    #[serde(default)]
    remaining_time: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct MeResponse {
    user: User,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> AuthClient {
        AuthClient::with_base_url(&server.uri(), None)
    }

    fn user_json(id: &str, email: &str) -> serde_json::Value {
        json!({
            "id": id,
            "email": email,
            "fullName": "Dana Reed",
            "role": "admin",
        })
    }

    /// Test: 200 without the first-time flag authenticates.
    #[tokio::test]
    async fn test_login_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({
                "email": "head@brookfield.test",
                "password": "summer#2026",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": user_json("u1", "head@brookfield.test"),
                "token": "tok-af9b2c",
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .login("head@brookfield.test", "summer#2026")
            .await;

        match outcome {
            LoginOutcome::Authenticated(session) => {
                assert_eq!(session.token, "tok-af9b2c");
                assert_eq!(session.user.email, "head@brookfield.test");
            }
            other => panic!("expected Authenticated, got {other:?}"),
        }
    }

    /// Test: the first-time flag turns a 200 into a forced password change.
    #[tokio::test]
    async fn test_login_first_time_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": user_json("u2", "new.teacher@brookfield.test"),
                "token": "tok-first",
                "firstTimeLogin": true,
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .login("new.teacher@brookfield.test", "Welcome!1")
            .await;
        assert_eq!(outcome, LoginOutcome::FirstTimeLoginRequired);
    }

    /// Test: 401 carries the remaining-attempts hint when present.
    #[tokio::test]
    async fn test_login_invalid_credentials_with_hint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "Invalid email or password",
                "attemptsRemaining": 2,
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).login("a@b.com", "bad").await;
        assert_eq!(
            outcome,
            LoginOutcome::InvalidCredentials {
                attempts_remaining: Some(2)
            }
        );
    }

    /// Test: a bare 401 still classifies, without a hint.
    #[tokio::test]
    async fn test_login_invalid_credentials_bare() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let outcome = client_for(&server).login("a@b.com", "bad").await;
        assert_eq!(
            outcome,
            LoginOutcome::InvalidCredentials {
                attempts_remaining: None
            }
        );
    }

    /// Test: 423 with an unlock time and duration starts the countdown at
    /// exactly the reported duration.
    #[tokio::test]
    async fn test_login_temporary_lock() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(423).set_body_json(json!({
                "lockedUntil": "2026-08-25T10:31:30Z",
                "remainingTime": 90,
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).login("a@b.com", "bad").await;
        match outcome {
            LoginOutcome::TemporaryLocked {
                locked_until,
                remaining_seconds,
                ..
            } => {
                assert!(locked_until.is_some());
                assert_eq!(remaining_seconds, 90);
            }
            other => panic!("expected TemporaryLocked, got {other:?}"),
        }
    }

    /// Test: unexpected statuses are a retryable network failure, not a panic.
    #[tokio::test]
    async fn test_login_unexpected_status_is_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let outcome = client_for(&server).login("a@b.com", "pw").await;
        assert_eq!(outcome, LoginOutcome::NetworkFailure);
    }

    /// Test: transport failure maps to NetworkFailure.
    #[tokio::test]
    async fn test_login_transport_failure() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = AuthClient::with_base_url(&uri, Some(Duration::from_secs(2)));
        let outcome = client.login("a@b.com", "pw").await;
        assert_eq!(outcome, LoginOutcome::NetworkFailure);
    }

    /// Test: a valid token resolves to its user.
    #[tokio::test]
    async fn test_fetch_current_user_valid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(bearer_token("tok-af9b2c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": user_json("u1", "head@brookfield.test"),
            })))
            .mount(&server)
            .await;

        let user = client_for(&server).fetch_current_user("tok-af9b2c").await;
        assert_eq!(user.unwrap().email, "head@brookfield.test");
    }

    /// Test: a rejected token yields None, never an error.
    #[tokio::test]
    async fn test_fetch_current_user_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let user = client_for(&server).fetch_current_user("tok-stale").await;
        assert!(user.is_none());
    }

    /// Test: change-password re-authenticates first; a 401 there surfaces
    /// as CurrentPasswordIncorrect and the change endpoint is never hit.
    #[tokio::test]
    async fn test_change_password_wrong_current() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/change-password"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .change_password("head@brookfield.test", "wrong", "next-pass!1", "next-pass!1")
            .await;
        assert_eq!(result, Err(PasswordError::CurrentPasswordIncorrect));
    }

    /// Test: change-password forwards the user id from the re-auth response.
    #[tokio::test]
    async fn test_change_password_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": user_json("u7", "new.teacher@brookfield.test"),
                "token": "tok-first",
                "firstTimeLogin": true,
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/change-password"))
            .and(body_partial_json(json!({"userId": "u7"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .change_password(
                "new.teacher@brookfield.test",
                "Welcome!1",
                "next-pass!1",
                "next-pass!1",
            )
            .await;
        assert_eq!(result, Ok(()));
    }

    /// Test: reset-password 4xx means the token was rejected.
    #[tokio::test]
    async fn test_reset_password_rejected_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/reset-password"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Reset token expired",
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .reset_password_with_token("abc", "x@y.com", "next-pass!1", "next-pass!1")
            .await;
        assert_eq!(
            result,
            Err(PasswordError::TokenInvalidOrExpired {
                message: "Reset token expired".to_string()
            })
        );
    }

    /// Test: a successful reset sends all four fields.
    #[tokio::test]
    async fn test_reset_password_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/reset-password"))
            .and(body_json(json!({
                "token": "abc",
                "email": "x@y.com",
                "newPassword": "next-pass!1",
                "confirmPassword": "next-pass!1",
            })))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .reset_password_with_token("abc", "x@y.com", "next-pass!1", "next-pass!1")
            .await;
        assert_eq!(result, Ok(()));
    }

    /// Test: forgot-password surfaces the backend's message on rejection.
    #[tokio::test]
    async fn test_forgot_password_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/forgot-password"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": "No account for that email",
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .request_password_reset("nobody@brookfield.test")
            .await;
        assert_eq!(
            result,
            Err(PasswordError::Rejected {
                message: "No account for that email".to_string()
            })
        );
    }

    /// Test: the permanent flag wins over every other lock field.
    #[test]
    fn test_map_locked_permanent_wins() {
        let body = LockedResponse {
            permanently_locked: true,
            account_locked: true,
            locked_until: Some(Utc::now()),
            remaining_time: Some(60),
            message: None,
        };
        assert_eq!(
            map_locked(&body, Utc::now()),
            LoginOutcome::PermanentlyLocked
        );
    }

    /// Test: lockedUntil without a duration computes the countdown from now.
    #[test]
    fn test_map_locked_until_computes_remaining() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 10, 0, 0).unwrap();
        let body = LockedResponse {
            locked_until: Some(now + chrono::Duration::seconds(120)),
            ..Default::default()
        };
        match map_locked(&body, now) {
            LoginOutcome::TemporaryLocked {
                locked_until,
                remaining_seconds,
                message,
            } => {
                assert!(locked_until.is_some());
                assert_eq!(remaining_seconds, 120);
                assert_eq!(message, LOCKED_UNTIL_MESSAGE);
            }
            other => panic!("expected TemporaryLocked, got {other:?}"),
        }
    }

    /// Test: remainingTime without lockedUntil is its own sub-case with
    /// its own default message.
    #[test]
    fn test_map_locked_remaining_only_sub_case() {
        let body = LockedResponse {
            remaining_time: Some(45),
            ..Default::default()
        };
        match map_locked(&body, Utc::now()) {
            LoginOutcome::TemporaryLocked {
                locked_until,
                remaining_seconds,
                message,
            } => {
                assert_eq!(locked_until, None);
                assert_eq!(remaining_seconds, 45);
                assert_eq!(message, LOCKED_RETRY_MESSAGE);
            }
            other => panic!("expected TemporaryLocked, got {other:?}"),
        }
    }

    /// Test: an unlock time in the past clamps to zero, never negative.
    #[test]
    fn test_map_locked_past_until_clamps_to_zero() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 10, 0, 0).unwrap();
        let body = LockedResponse {
            locked_until: Some(now - chrono::Duration::seconds(30)),
            ..Default::default()
        };
        match map_locked(&body, now) {
            LoginOutcome::TemporaryLocked {
                remaining_seconds, ..
            } => assert_eq!(remaining_seconds, 0),
            other => panic!("expected TemporaryLocked, got {other:?}"),
        }
    }

    /// Test: the admin flag and a bare 423 both need an administrator.
    #[test]
    fn test_map_locked_admin_and_bare() {
        let body = LockedResponse {
            account_locked: true,
            ..Default::default()
        };
        assert_eq!(map_locked(&body, Utc::now()), LoginOutcome::AdminLocked);

        let bare = LockedResponse::default();
        assert_eq!(map_locked(&bare, Utc::now()), LoginOutcome::AdminLocked);
    }
}
