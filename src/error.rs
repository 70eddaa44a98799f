//! Error types for schoolmed

use std::collections::BTreeMap;

use thiserror::Error;

use crate::api::envelope::ApiErrorBody;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found. Run 'schoolmed init' first.")]
    ConfigNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// No response reached the caller (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status. `body` is the raw
    /// payload the server sent back.
    #[error("API error ({status}): {body}")]
    Api {
        status: u16,
        body: serde_json::Value,
    },

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Not logged in. Run 'schoolmed login' first.")]
    NotAuthenticated,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status of a server-side rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }

    /// Field-level messages carried by a server validation error, keyed by
    /// form field. Empty for every other kind of error.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        match self {
            Error::Api { body, .. } => ApiErrorBody::from_value(body).field_map(),
            _ => BTreeMap::new(),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
