//! Configuration loading for the `wistia-embed` CLI.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.wistia-embed/config.toml` (user)
//! 3. `/etc/wistia-embed/config.toml` (system)
//!
//! The API key may be left out of the file and supplied through the
//! `WISTIA_API_KEY` environment variable instead.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::providers::{RetryConfig, RetryingVideoProvider, WistiaClient};
use crate::providers::wistia::DEFAULT_BASE_URL;
use crate::schema::Schema;
use crate::traits::VideoProvider;
use crate::{EmbedError, Result};

/// Environment variable consulted when `[api].api_key` is absent.
pub const API_KEY_ENV_VAR: &str = "WISTIA_API_KEY";

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    /// Project ids whose videos are offered in the picker.
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub retry: RetrySettings,
    /// Custom parameter schema; the embedded one is used when absent.
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
}

/// Video host API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// API base URL (default: https://api.wistia.com/v1).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Retry settings as written in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySettings {
    /// Maximum attempts including the first (default: 3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds (default: 500).
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Cap on the backoff in milliseconds (default: 10000).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> Result<RetryConfig> {
        if self.max_attempts == 0 {
            return Err(EmbedError::Configuration(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(RetryConfig::new()
            .max_attempts(self.max_attempts)
            .initial_delay(Duration::from_millis(self.initial_delay_ms))
            .max_delay(Duration::from_millis(self.max_delay_ms)))
    }
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.wistia-embed/config.toml`
    /// 3. `/etc/wistia-embed/config.toml`
    ///
    /// An explicit path that does not exist is an error. With no explicit
    /// path and no file in either location, defaults are returned.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and parse a specific config file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EmbedError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            EmbedError::Configuration(msg) => {
                EmbedError::Configuration(format!("{msg} (in {path:?})"))
            }
            other => other,
        })
    }

    /// Parse a config document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| EmbedError::Configuration(format!("Failed to parse config: {e}")))
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(EmbedError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".wistia-embed").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/wistia-embed/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// The API key from the file, else from `WISTIA_API_KEY`.
    pub fn api_key(&self) -> Result<String> {
        self.api
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV_VAR).ok().filter(|k| !k.is_empty()))
            .ok_or(EmbedError::MissingApiKey)
    }

    /// The configured schema, or the embedded one.
    pub fn schema(&self) -> Result<Schema> {
        match &self.schema_path {
            Some(path) => Schema::load(path),
            None => Ok(Schema::embedded().clone()),
        }
    }

    /// Build the API client, wrapped with the configured retry policy.
    pub fn provider(&self) -> Result<Arc<dyn VideoProvider>> {
        let client = WistiaClient::with_config(
            self.api_key()?,
            &self.api.base_url,
            Duration::from_secs(self.api.timeout_secs),
        )?;
        let retry = self.retry.to_retry_config()?;
        Ok(Arc::new(RetryingVideoProvider::new(Arc::new(client), retry)))
    }
}
