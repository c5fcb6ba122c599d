//! # User and authentication payloads
//!
//! [`User`] is the identity record returned by `/auth/me` (REST) or `me`
//! (GraphQL), and embedded in every [`AuthResponse`]. Field names follow the
//! backend's camelCase JSON (`fullName`, `createdAt`).
//!
//! [`Role`] is a flat two-level hierarchy: `ADMIN` satisfies every role
//! requirement, `USER` satisfies only itself.

use serde::{Deserialize, Serialize};

use super::Document;

/// Account role as reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    /// Whether a holder of `self` may access something gated on `required`.
    pub fn satisfies(self, required: Role) -> bool {
        self == Role::Admin || self == required
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: String,
}

impl User {
    /// Get display name, falling back to email if the full name is blank.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owners and admins may modify or delete a document.
    pub fn can_manage(&self, document: &Document) -> bool {
        self.is_admin() || self.id == document.user_id
    }
}

/// Login request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Response to a successful login or registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}
