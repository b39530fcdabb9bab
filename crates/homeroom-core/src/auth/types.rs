//! Domain types shared across the auth layer.

use serde::{Deserialize, Serialize};

/// Role assigned to a CMS account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    /// Returns the display label for this role.
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
            Role::Parent => "Parent",
        }
    }
}

/// Identity record returned by the backend.
///
/// Immutable once fetched; replaced wholesale on re-fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A bearer token and the user it authenticates.
///
/// At most one session exists per process; `SessionStore` owns it and
/// everyone else borrows it for the duration of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Token and email pair carried in from a password-reset link.
///
/// Consumed by exactly one reset attempt; the token is validated by the
/// backend, never locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetRequest {
    pub token: String,
    pub email: String,
}
