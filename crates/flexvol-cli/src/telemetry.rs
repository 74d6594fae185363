//! Structured log file initialisation.
//!
//! Standard output and standard error belong to the driver protocol, so the
//! subscriber writes to the configured log file only. Without a log file no
//! subscriber is installed and events are discarded.

use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use camino::Utf8PathBuf;
use flexvol_config::{Config, LogFormat};
use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

static TELEMETRY_GUARD: OnceCell<bool> = OnceCell::new();

/// Handle returned when telemetry has been initialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    enabled: bool,
}

impl TelemetryHandle {
    /// Returns true when events are written to a log file.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to open the log file for appending.
    #[error("failed to open log file '{path}': {source}")]
    LogFile {
        /// Configured log file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Configures the global tracing subscriber when invoked for the first time.
///
/// Repeated calls are idempotent and report the state established by the
/// first successful call.
///
/// # Errors
///
/// Returns an error when the filter is invalid, the log file cannot be
/// opened, or another subscriber is already installed.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(config))
        .map(|enabled| TelemetryHandle { enabled: *enabled })
}

fn install_subscriber(config: &Config) -> Result<bool, TelemetryError> {
    let Some(path) = config.log_file() else {
        return Ok(false);
    };

    let filter = EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TelemetryError::LogFile {
            path: path.to_owned(),
            source,
        })?;

    let builder = |filter: EnvFilter, file: File| {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
    };

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.log_format() {
        LogFormat::Json => Box::new(builder(filter, file).json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder(filter, file).compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)?;
    Ok(true)
}
