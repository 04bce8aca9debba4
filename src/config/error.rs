use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving the runtime configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} not set in environment.\n{remediation}")]
    MissingRequiredValue {
        key: &'static str,
        remediation: &'static str,
    },

    #[error("Invalid {key}: {value}. Must be {allowed}")]
    InvalidEnumValue {
        key: &'static str,
        value: String,
        allowed: String,
    },

    #[error("Failed to parse {key}: '{value}' is not a valid {expected}")]
    MalformedValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid {key}: {value}. Must be {constraint}")]
    OutOfRange {
        key: &'static str,
        value: String,
        constraint: &'static str,
    },

    #[error("Invalid backtest window: start {start} is after end {end}")]
    InvalidBacktestWindow { start: String, end: String },

    #[error("Failed to read environment file {}: {source}", path.display())]
    Overlay {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("Failed to create log directory {}: {source}", path.display())]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Errors an operator is expected to fix by editing the environment file.
    ///
    /// Everything else is reported as unexpected by the diagnostic harness.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingRequiredValue { .. } | ConfigError::InvalidEnumValue { .. }
        )
    }

    /// The environment key the error refers to, if any
    pub fn key(&self) -> Option<&'static str> {
        match self {
            ConfigError::MissingRequiredValue { key, .. }
            | ConfigError::InvalidEnumValue { key, .. }
            | ConfigError::MalformedValue { key, .. }
            | ConfigError::OutOfRange { key, .. } => Some(key),
            ConfigError::InvalidBacktestWindow { .. } => Some("BACKTEST_END_DATE"),
            ConfigError::Overlay { .. } => None,
            ConfigError::LogDirectory { .. } => Some("LOG_FILE"),
        }
    }
}
