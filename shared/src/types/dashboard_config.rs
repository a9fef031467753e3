use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Backend root, e.g. `https://api.example.com`. Also the prefix for
    /// uploaded asset links.
    ///
    /// The `API_BASE_URL` environment variable takes priority when set.
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Directory holding the persisted session file. `None` keeps the
    /// session in memory for the lifetime of the process.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_login_route")]
    pub login_route: String,
    /// Clock skew tolerated when checking token expiry.
    #[serde(default)]
    pub token_leeway_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordResetConfig {
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
    /// Delay between a successful reset and the forced logout.
    #[serde(default = "default_logout_delay")]
    pub logout_delay_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub password_reset: PasswordResetConfig,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

impl ApiConfig {
    /// Resolve the base URL with `API_BASE_URL` env-var taking priority over
    /// the config file field. Trailing slashes are stripped.
    ///
    /// Returns `None` when neither source is set.
    pub fn resolved_base_url(&self) -> Option<String> {
        std::env::var("API_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| Some(self.base_url.clone()))
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
    }
}

impl PasswordResetConfig {
    pub fn logout_delay(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.logout_delay_secs)
    }
}

impl AppConfig {
    /// Config for a given backend with every other section defaulted.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.to_string(),
            },
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
            password_reset: PasswordResetConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_route: default_login_route(),
            token_leeway_secs: 0,
        }
    }
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            min_password_len: default_min_password_len(),
            logout_delay_secs: default_logout_delay(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde defaults
// ---------------------------------------------------------------------------

pub fn default_login_route() -> String {
    "/login".to_string()
}

pub fn default_min_password_len() -> usize {
    5
}

pub fn default_logout_delay() -> u64 {
    3
}
