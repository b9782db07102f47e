//! # Client configuration
//!
//! [`ClientConfig`] carries everything the HTTP client needs from the outside
//! world: where the API lives, which environment the app runs in, the overall
//! request timeout, and where to send the user when their session expires.
//!
//! ## Sources
//!
//! | Source | Constructor |
//! |--------|-------------|
//! | TOML text | [`ClientConfig::from_toml`] |
//! | Environment | [`ClientConfig::from_env`] |
//!
//! ```toml
//! base_url = "https://api.example.com"
//! env = "development"        # "development" | "production" | "test"
//! timeout_ms = 15000
//! login_path = "/login"
//! ```
//!
//! Environment variables: `API_BASE_URL`, `APP_ENV`, `API_TIMEOUT_MS`,
//! `LOGIN_PATH`. On native targets a `.env` file is loaded first via
//! `dotenvy`. In the browser there is no process environment, so the values
//! are baked in at compile time with `option_env!`.
//!
//! Every field has a default, so an empty file or environment gives a working
//! configuration pointed at the page's own origin.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Runtime environment flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    Development,
    #[default]
    Production,
    Test,
}

impl AppEnv {
    pub fn is_development(self) -> bool {
        self == AppEnv::Development
    }
}

impl FromStr for AppEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            "test" => Ok(AppEnv::Test),
            other => Err(ConfigError::InvalidValue {
                key: "APP_ENV",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// HTTP client configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Prefix for relative request paths. Empty means the page's origin.
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub env: AppEnv,
    /// Overall request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Where to navigate when the server reports an expired session.
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_login_path() -> String {
    "/login".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            env: AppEnv::default(),
            timeout_ms: default_timeout_ms(),
            login_path: default_login_path(),
        }
    }
}

impl ClientConfig {
    /// Create a config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the environment.
    pub fn with_env(mut self, env: AppEnv) -> Self {
        self.env = env;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            dotenvy::dotenv().ok();
            Self::from_lookup(|key| std::env::var(key).ok())
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::from_lookup(|key| {
                match key {
                    "API_BASE_URL" => option_env!("API_BASE_URL"),
                    "APP_ENV" => option_env!("APP_ENV"),
                    "API_TIMEOUT_MS" => option_env!("API_TIMEOUT_MS"),
                    "LOGIN_PATH" => option_env!("LOGIN_PATH"),
                    _ => None,
                }
                .map(str::to_string)
            })
        }
    }

    /// Build from an arbitrary variable lookup. Missing keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(base_url) = lookup("API_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(env) = lookup("APP_ENV") {
            config.env = env.parse()?;
        }
        if let Some(timeout) = lookup("API_TIMEOUT_MS") {
            config.timeout_ms = timeout.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_TIMEOUT_MS",
                value: timeout.clone(),
            })?;
        }
        if let Some(path) = lookup("LOGIN_PATH") {
            config.login_path = path;
        }
        Ok(config)
    }
}
