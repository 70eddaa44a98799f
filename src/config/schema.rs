//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

/// Backend REST API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout applied to every call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Clear the stored session when the server answers 403
    #[serde(default = "default_logout_on_forbidden")]
    pub logout_on_forbidden: bool,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_logout_on_forbidden() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            logout_on_forbidden: default_logout_on_forbidden(),
        }
    }
}

/// Session persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File holding the persisted `token` and `user` entries
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Reject tokens that carry no `exp` claim
    #[serde(default = "default_require_expiry")]
    pub require_expiry: bool,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./.schoolmed/session.json")
}

fn default_require_expiry() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            require_expiry: default_require_expiry(),
        }
    }
}

/// Keys for third-party widgets. Read as-is, never validated.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntegrationsConfig {
    #[serde(default)]
    pub editor_license_key: Option<String>,

    #[serde(default)]
    pub captcha_site_key: Option<String>,
}

impl ApiConfig {
    /// Full URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
