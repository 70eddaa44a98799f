//! Authentication models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User roles for authorization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    /// Parent - sees their own children
    Parent,
    /// Nurse - handles appointments, medical events and medicine
    Nurse,
    /// Administrator - manages users, classes and campaigns
    Admin,
    /// Any role the issuer sends that this client does not know
    Other(String),
}

impl UserRole {
    /// Landing route for this role, `None` for unknown roles
    pub fn home_path(&self) -> Option<&'static str> {
        match self {
            UserRole::Parent => Some("/parent"),
            UserRole::Nurse => Some("/nurse"),
            UserRole::Admin => Some("/admin"),
            UserRole::Other(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, UserRole::Other(_))
    }
}

impl FromStr for UserRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "parent" => UserRole::Parent,
            "nurse" => UserRole::Nurse,
            "admin" => UserRole::Admin,
            _ => UserRole::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(role) => role,
            Err(never) => match never {},
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.to_string()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Parent => write!(f, "parent"),
            UserRole::Nurse => write!(f, "nurse"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Identity of the logged-in user, persisted under the `user` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Subject identifier
    pub id: String,
    #[serde(default)]
    pub email: String,
    pub role: UserRole,
    /// Students linked to a parent account
    #[serde(default)]
    pub student_ids: Vec<String>,
    /// Token expiry, seconds since epoch
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl User {
    pub fn is_parent(&self) -> bool {
        self.role == UserRole::Parent
    }

    pub fn is_nurse(&self) -> bool {
        self.role == UserRole::Nurse
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Login credentials
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response with token
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
}
