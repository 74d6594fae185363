/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log file format.
#[must_use]
pub const fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}
