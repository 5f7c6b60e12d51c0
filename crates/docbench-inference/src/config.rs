//! Gateway configuration.
//!
//! Configuration comes from code or from `GEMINI_*` environment variables.
//! The API key is deliberately not part of [`GeminiConfig::from_env`]: it is
//! looked up from the process environment at call time unless set
//! explicitly.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | GEMINI_BASE_URL | https://generativelanguage.googleapis.com/v1beta | API root |
//! | GEMINI_TIMEOUT | (transport default) | Request timeout in seconds |
//! | API_KEY / GEMINI_API_KEY | (none) | Credential, read per call |

use std::env;

use thiserror::Error;
use tracing::debug;

use docbench_core::defaults;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for docbench_core::Error {
    fn from(e: ConfigError) -> Self {
        docbench_core::Error::Config(e.to_string())
    }
}

/// Gemini gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// API root, without a trailing `/models`.
    pub base_url: String,
    /// Explicit API key; when `None` the environment is consulted per call.
    pub api_key: Option<String>,
    /// Request timeout; `None` leaves the transport default in place.
    pub timeout_seconds: Option<u64>,
    /// Environment variables searched for the key, in order.
    pub api_key_env: Vec<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::GEMINI_URL.to_string(),
            api_key: None,
            timeout_seconds: None,
            api_key_env: vec![
                defaults::ENV_API_KEY.to_string(),
                defaults::ENV_GEMINI_API_KEY.to_string(),
            ],
        }
    }
}

impl GeminiConfig {
    /// Load from `GEMINI_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("GEMINI_BASE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }

        if let Ok(raw) = env::var("GEMINI_TIMEOUT") {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: "GEMINI_TIMEOUT",
                value: raw.clone(),
            })?;
            config.timeout_seconds = Some(secs);
        }

        debug!(
            base_url = %config.base_url,
            timeout_seconds = ?config.timeout_seconds,
            "Loaded gateway config from environment"
        );
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_seconds(mut self, secs: u64) -> Self {
        self.timeout_seconds = Some(secs);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "Gemini base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.timeout_seconds == Some(0) {
            return Err(ConfigError::Validation(
                "Gemini timeout_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve the API key: explicit value first, then the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Some(key.clone());
        }
        self.api_key_env
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find(|v| !v.is_empty())
    }
}
