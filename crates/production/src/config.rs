//! Runner configuration loaded from TOML.

use meshscout_discovery::{
    DiscoveryConfig, IDLE_TIMEOUT_MS, STARTUP_DELAY_MS, WAIT_RESPONSE_TIMEOUT_MS,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or validating a [`RunnerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level runner configuration.
///
/// Every field is optional in the file:
///
/// ```toml
/// startup_delay_ms = 1000
/// idle_timeout_ms = 10000
/// wait_response_timeout_ms = 10000
/// seed = 42
/// log_filter = "meshscout=debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Delay between start and the first request.
    pub startup_delay_ms: u64,

    /// Hold period in idle before (re)issuing a request.
    pub idle_timeout_ms: u64,

    /// How long to collect responses after a request was accepted.
    pub wait_response_timeout_ms: u64,

    /// Seed for the transaction sequence generator. Random when absent.
    pub seed: Option<u64>,

    /// Default `tracing` filter directive (`RUST_LOG` overrides it).
    pub log_filter: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            startup_delay_ms: STARTUP_DELAY_MS,
            idle_timeout_ms: IDLE_TIMEOUT_MS,
            wait_response_timeout_ms: WAIT_RESPONSE_TIMEOUT_MS,
            seed: None,
            log_filter: "info".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject periods that would make the cycle spin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "idle_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.wait_response_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "wait_response_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Timer durations for the state machine.
    pub fn discovery_config(&self) -> DiscoveryConfig {
        DiscoveryConfig::with_timeouts(
            Duration::from_millis(self.idle_timeout_ms),
            Duration::from_millis(self.wait_response_timeout_ms),
        )
        .with_startup_delay(Duration::from_millis(self.startup_delay_ms))
    }
}
