//! Client-side authentication and session lifecycle.
//!
//! The school CMS backend owns password hashing, lockout counting, and
//! token issuance; this layer consumes the results. It classifies raw
//! backend responses into typed outcomes, keeps exactly one persisted
//! session per process, and validates that session on startup.

pub mod client;
pub mod outcome;
pub mod policy;
pub mod service;
pub mod session;
pub mod types;

pub use client::AuthClient;
pub use outcome::{LoginOutcome, PasswordError};
pub use policy::{PolicyViolation, validate_new_password};
pub use service::AuthService;
pub use session::{SessionState, SessionStore, mask_token};
pub use types::{ResetRequest, Role, Session, User};
