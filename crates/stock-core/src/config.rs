//! Runtime configuration.
//!
//! Configuration is read through a key lookup so the same rules apply to
//! Spin variables, environment variables and CLI config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default upstream catalog service.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://dummyjson.com";

/// Default upstream request timeout.
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000;

/// Configuration keys, in Spin variable naming.
pub mod keys {
    pub const UPSTREAM_BASE_URL: &str = "upstream_base_url";
    pub const UPSTREAM_TIMEOUT_MS: &str = "upstream_timeout_ms";
    pub const ENVIRONMENT: &str = "environment";
    pub const LOG_LEVEL: &str = "log_level";
    pub const LOG_FORMAT: &str = "log_format";

    /// All known keys.
    pub const ALL: [&str; 5] = [
        UPSTREAM_BASE_URL,
        UPSTREAM_TIMEOUT_MS,
        ENVIRONMENT,
        LOG_LEVEL,
        LOG_FORMAT,
    ];
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Upstream catalog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the catalog service, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl UpstreamConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            timeout_ms: DEFAULT_UPSTREAM_TIMEOUT_MS,
        }
    }
}

/// Dashboard runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Upstream catalog settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Deployment environment name, reported by the health check.
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Minimum log level name.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log format name (`json` or `human`).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            environment: default_environment(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl DashboardConfig {
    /// Build a configuration from a key lookup. Missing or blank keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().overlay(lookup)
    }

    /// Apply values from a key lookup on top of this configuration.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = get(keys::UPSTREAM_BASE_URL) {
            self.upstream.base_url = url;
        }
        if let Some(raw) = get(keys::UPSTREAM_TIMEOUT_MS) {
            self.upstream.timeout_ms = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: keys::UPSTREAM_TIMEOUT_MS.to_string(),
                message: format!("expected milliseconds, got '{}'", raw),
            })?;
        }
        if let Some(env) = get(keys::ENVIRONMENT) {
            self.environment = env;
        }
        if let Some(level) = get(keys::LOG_LEVEL) {
            self.log_level = level.to_lowercase();
        }
        if let Some(format) = get(keys::LOG_FORMAT) {
            self.log_format = format.to_lowercase();
        }

        self.validate()?;
        Ok(self)
    }

    /// Check invariants that the lookup cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.upstream.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: keys::UPSTREAM_BASE_URL.to_string(),
                message: format!("expected an http(s) URL, got '{}'", url),
            });
        }
        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: keys::UPSTREAM_TIMEOUT_MS.to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Upstream base URL without a trailing slash.
    pub fn upstream_base(&self) -> &str {
        self.upstream.base_url.trim_end_matches('/')
    }
}
