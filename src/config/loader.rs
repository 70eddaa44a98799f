//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

const CONFIG_FILENAME: &str = "schoolmed.toml";

pub const ENV_API_URL: &str = "SCHOOLMED_API_URL";
pub const ENV_EDITOR_LICENSE_KEY: &str = "SCHOOLMED_EDITOR_LICENSE_KEY";
pub const ENV_CAPTCHA_SITE_KEY: &str = "SCHOOLMED_CAPTCHA_SITE_KEY";

/// Load configuration from schoolmed.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let mut config: Config = toml::from_str(&content)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Load schoolmed.toml if one exists, otherwise defaults plus environment
pub fn load_config_or_default() -> Result<Config> {
    match load_config() {
        Ok(config) => Ok(config),
        Err(Error::ConfigNotFound) => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILENAME);
            let mut config = Config::default();
            apply_env_overrides(&mut config);
            Ok(config)
        }
        Err(e) => Err(e),
    }
}

/// Write a configuration to disk
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).map_err(|e| Error::Config(e.to_string()))?;
    fs::write(path, content)?;
    Ok(())
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

fn apply_env_overrides(config: &mut Config) {
    if let Some(url) = non_empty_var(ENV_API_URL) {
        config.api.base_url = url;
    }
    if let Some(key) = non_empty_var(ENV_EDITOR_LICENSE_KEY) {
        config.integrations.editor_license_key = Some(key);
    }
    if let Some(key) = non_empty_var(ENV_CAPTCHA_SITE_KEY) {
        config.integrations.captcha_site_key = Some(key);
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // Static pattern; a failure here is a bug, not bad input
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("env interpolation pattern is valid");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# schoolmed configuration

[api]
base_url = "${SCHOOLMED_API_URL:-http://localhost:8080/api}"
timeout_secs = 30
# Clear the local session when the server answers 403
logout_on_forbidden = true

[session]
storage_path = "./.schoolmed/session.json"
# Set to false only if the issuer may omit the exp claim
require_expiry = true

[integrations]
# editor_license_key = "${SCHOOLMED_EDITOR_LICENSE_KEY}"
# captcha_site_key = "${SCHOOLMED_CAPTCHA_SITE_KEY}"
"#
}
