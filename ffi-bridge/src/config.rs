//! Configuration loading for lb-ffi-bridge.
//!
//! Configuration is loaded from a TOML file (conventionally `lockbook.toml`).
//! Every section and field is optional.

use std::path::{Path, PathBuf};

use lb_ffi_types::WireCompat;
use serde::Deserialize;

use crate::adapter::LineEndings;

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeConfig {
    /// Core session settings.
    #[serde(default)]
    pub core: CoreConfig,
    /// Boundary behavior.
    #[serde(default)]
    pub ffi: FfiConfig,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Core session settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Directory the core keeps its database and logs in (default: `lockbook`).
    #[serde(default = "default_writeable_path")]
    pub writeable_path: PathBuf,
    /// Server to create accounts on.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

/// Boundary behavior.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FfiConfig {
    /// `lf` (default) or `crlf`.
    #[serde(default)]
    pub line_endings: LineEndings,
    /// `strict` (default) or `accept-legacy`.
    #[serde(default)]
    pub wire_compat: WireCompat,
}

/// Log output.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive (default: `info`). `RUST_LOG` overrides it.
    #[serde(default = "default_filter")]
    pub filter: String,
}

// Default value functions
fn default_writeable_path() -> PathBuf {
    PathBuf::from("lockbook")
}

fn default_api_url() -> String {
    "https://api.prod.lockbook.net".to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            writeable_path: default_writeable_path(),
            api_url: default_api_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.core.writeable_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "core.writeable_path must not be empty".to_string(),
            ));
        }
        if self.core.api_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "core.api_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// Parsed, but a value is unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}
