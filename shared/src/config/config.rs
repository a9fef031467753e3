use std::fs;
use tracing::{debug, error, info};

use crate::types::dashboard_config::{AppConfig, ConfigError};

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    info!("Loading configuration from: {}", path);

    let contents = fs::read_to_string(path)?;
    debug!("Processing file: {}", path);

    parse_config(&contents)
}

/// Parse and validate a TOML document. Split out from [`load_config`] so
/// embedders that ship the config inline can skip the filesystem.
pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    if contents.trim().is_empty() {
        error!("Configuration file is empty");
        return Err(ConfigError::InvalidConfig("empty file".into()));
    }

    let config: AppConfig = toml::from_str(contents)?;

    info!("Configuration loaded successfully");
    debug!("Config: {:?}", config);

    validate_config(&config)?;

    info!("Config validated");

    Ok(config)
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    match config.api.resolved_base_url() {
        None => {
            return Err(ConfigError::InvalidConfig(
                "base_url must be set via the API_BASE_URL env var or api.base_url config field"
                    .into(),
            ));
        }
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
            return Err(ConfigError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got {}",
                url
            )));
        }
        _ => {}
    }

    if !config.auth.login_route.starts_with('/') {
        return Err(ConfigError::InvalidConfig(
            "login_route must be an absolute path".into(),
        ));
    }

    if config.password_reset.min_password_len == 0 {
        return Err(ConfigError::InvalidConfig(
            "min_password_len must be greater than 0".into(),
        ));
    }

    Ok(())
}
