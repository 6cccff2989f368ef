//! # Client Configuration Module
//!
//! Configuration for the cache client: the service address plus per-request
//! options. It can be assembled with a builder, read from environment variables or
//! loaded from a JSON file.
//!
//! ## Environment
//!
//! - `CACHE_ADDR`: base address of the Cache service, e.g. `http://cache:8080`
//! - `CACHE_TIMEOUT_MS`: per-request timeout in milliseconds
//! - `CACHE_USER_AGENT`: value of the `user-agent` header

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the base address
pub const ADDR_ENV: &str = "CACHE_ADDR";

/// Environment variable holding the request timeout in milliseconds
pub const TIMEOUT_ENV: &str = "CACHE_TIMEOUT_MS";

/// Environment variable holding the user agent
pub const USER_AGENT_ENV: &str = "CACHE_USER_AGENT";

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid timeout {0:?}: expected milliseconds")]
    InvalidTimeout(String),
}

/// Configuration for the cache client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base address of the Cache service
    pub base_url: String,

    /// Timeout applied to each request, in milliseconds
    pub timeout_ms: Option<u64>,

    /// User agent sent with each request
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: None,
            user_agent: Some(format!("cache-client/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Set the base address of the Cache service
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Set the user agent sent with each request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl ClientConfig {
    /// Create a new builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from a lookup function, falling back to defaults for
    /// unset variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(ADDR_ENV) {
            config.base_url = addr;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout_ms = Some(millis);
        }
        if let Some(user_agent) = lookup(USER_AGENT_ENV) {
            config.user_agent = Some(user_agent);
        }

        Ok(config)
    }

    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = ClientConfig::builder()
            .base_url("http://cache:9000")
            .timeout(Duration::from_millis(250))
            .user_agent("tests")
            .build();

        assert_eq!(config.base_url, "http://cache:9000");
        assert_eq!(config.timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.user_agent.as_deref(), Some("tests"));
    }

    #[test]
    fn test_builder_timeout_saturates() {
        let config = ClientConfig::builder().timeout(Duration::MAX).build();
        assert_eq!(config.timeout_ms, Some(u64::MAX));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ADDR_ENV, "http://cache:8080"),
            (TIMEOUT_ENV, " 1500 "),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.base_url, "http://cache:8080");
        assert_eq!(config.timeout_ms, Some(1500));
        assert_eq!(config.user_agent, ClientConfig::default().user_agent);
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let result = ClientConfig::from_lookup(|name| {
            (name == TIMEOUT_ENV).then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidTimeout(v)) if v == "soon"));
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"base_url": "https://cache.internal", "timeout_ms": 30}}"#).unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://cache.internal");
        assert_eq!(config.timeout(), Some(Duration::from_millis(30)));
        assert_eq!(config.user_agent, ClientConfig::default().user_agent);
    }

    #[test]
    fn test_from_file_errors() {
        let missing = ClientConfig::from_file("/definitely/not/here.json");
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let invalid = ClientConfig::from_file(file.path());
        assert!(matches!(invalid, Err(ConfigError::Json(_))));
    }
}
