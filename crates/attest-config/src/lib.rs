//! Configuration for attest.
//!
//! Controls how failure messages are laid out and how retrying assertions
//! poll, without code changes.
//!
//! # Examples
//!
//! ```
//! use attest_config::AssertConfig;
//! use std::time::Duration;
//!
//! let config = AssertConfig::from_toml_str(r#"
//!     [message]
//!     max_line_length = 100
//!
//!     [retry]
//!     timeout_ms = 2000
//!     interval_ms = 50
//! "#).unwrap();
//!
//! assert_eq!(config.message.max_line_length, 100);
//! assert_eq!(config.retry.timeout(), Duration::from_secs(2));
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use attest_config::AssertConfig;
//!
//! let config = AssertConfig::load("attest.toml").unwrap_or_default();
//! assert_eq!(config.message.max_line_length, 78);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Narrowest line width a failure message may be clipped to.
pub const MIN_LINE_LENGTH: usize = 20;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level assertion configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AssertConfig {
    /// Failure message layout.
    #[serde(default)]
    pub message: MessageConfig,

    /// Defaults for retrying assertions.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl AssertConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// holds values rejected by [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the width failure messages are clipped to.
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.message.max_line_length = max_line_length;
        self
    }

    /// Sets the default retry timeout.
    pub fn with_retry_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.retry.timeout_ms = timeout_ms;
        self
    }

    /// Sets the default delay between retry attempts.
    pub fn with_retry_interval_ms(mut self, interval_ms: u64) -> Self {
        self.retry.interval_ms = interval_ms;
        self
    }

    /// Writes every failed retry attempt to the test output.
    pub fn with_intermediate_failures(mut self, emit: bool) -> Self {
        self.retry.emit_intermediate_failures = emit;
        self
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.message.max_line_length < MIN_LINE_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "message.max_line_length must be at least {}, got {}",
                MIN_LINE_LENGTH, self.message.max_line_length
            )));
        }
        if self.retry.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "retry.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.retry.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "retry.interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Failure message layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MessageConfig {
    /// Width long expected/actual values are clipped to.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
        }
    }
}

/// Defaults for retrying assertions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Write each failed attempt to the test output, not only the last.
    #[serde(default)]
    pub emit_intermediate_failures: bool,
}

impl RetryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            interval_ms: default_interval_ms(),
            emit_intermediate_failures: false,
        }
    }
}

fn default_max_line_length() -> usize {
    78
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_interval_ms() -> u64 {
    100
}
