//! Shared configuration for FlexVolume driver binaries.
//!
//! A driver is started by the orchestrator with a fixed positional argument
//! list, so command-line flags are unavailable for configuration. Values are
//! layered from built-in defaults, an optional configuration file named by
//! `FLEXVOL_CONFIG_PATH`, and `FLEXVOL_*` environment variables.
//!
//! Standard output and standard error carry the JSON protocol, which is why
//! logging only goes to [`Config::log_file`] and is off when that is unset.

mod defaults;
mod logging;

use std::ffi::OsString;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{DEFAULT_LOG_FILTER, default_log_format};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration shared by the dispatcher and driver binaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "FLEXVOL")]
pub struct Config {
    /// `tracing` filter directive applied to the log file.
    pub log_filter: Option<String>,
    /// Format of log file entries.
    pub log_format: Option<LogFormat>,
    /// File receiving log output; logging is disabled when unset.
    pub log_file: Option<Utf8PathBuf>,
}

impl Config {
    /// Returns the configured log filter or [`DEFAULT_LOG_FILTER`].
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Returns the configured log format or the JSON default.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }

    /// Returns the log file path, if logging is enabled.
    #[must_use]
    pub fn log_file(&self) -> Option<&Utf8Path> {
        self.log_file.as_deref()
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A configuration source could not be read or merged.
    #[error("failed to load configuration: {0}")]
    Load(Arc<OrthoError>),
}

/// Loads [`Config`] from defaults, the configuration file and the environment.
///
/// Only `program` is forwarded to the loader so positional protocol
/// arguments are never mistaken for configuration flags.
///
/// # Errors
///
/// Returns [`ConfigError::Load`] when a source is malformed.
pub fn load(program: impl Into<OsString>) -> Result<Config, ConfigError> {
    Config::load_from_iter([program.into()]).map_err(ConfigError::Load)
}
