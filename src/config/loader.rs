//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "OPENBOARD_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = read_file(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Defaults, then the optional file, then the environment overlay, then validation.
pub fn load<F>(path: Option<&Path>, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_file(path)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config, lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load using the process environment.
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    let path = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    load(path.as_deref(), |key| env::var(key).ok())
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "Configuration file read");
    Ok(config)
}

/// Overlay environment variables on top of file or default values.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("OPENBOARD_BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = lookup("OPENBOARD_DATA_SOURCE") {
        config.data.default_mode = Some(v);
    }
    if let Some(v) = lookup("OPENBOARD_API_BASE_URL") {
        config.data.api_base_url = non_blank(v);
    }
    if let Some(v) = lookup("OPENBOARD_USE_PROXY") {
        // Only the literal "true" enables proxying.
        config.data.use_proxy = v == "true";
    }
    if let Some(v) = lookup("OPENBOARD_APP_ORIGIN") {
        config.data.app_origin = non_blank(v);
    }
    if let Some(v) = lookup("RESEND_API_KEY") {
        config.mail.api_key = non_blank(v);
    }
    if let Some(v) = lookup("WAITLIST_FORWARD_TO") {
        config.mail.forward_to = non_blank(v);
    }
    if let Some(v) = lookup("FROM_EMAIL").and_then(non_blank) {
        config.mail.from = v;
    }
}

fn non_blank(v: String) -> Option<String> {
    if v.trim().is_empty() {
        None
    } else {
        Some(v)
    }
}
