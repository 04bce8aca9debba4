//! Logging and monitoring configuration.

use super::error::ConfigError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Log level and log file location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level name as configured, e.g. `INFO`
    pub level: String,
    pub file_path: String,
}

impl LoggingConfig {
    /// Directive usable by `tracing_subscriber::EnvFilter`.
    ///
    /// Python-style names are mapped onto the nearest tracing level.
    pub fn filter_directive(&self) -> &'static str {
        match self.level.to_uppercase().as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "WARN" | "WARNING" => "warn",
            "ERROR" | "CRITICAL" | "FATAL" => "error",
            _ => "info",
        }
    }

    pub fn log_dir(&self) -> Option<&Path> {
        Path::new(&self.file_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Create the parent directory of the log file if it does not exist yet
    pub fn ensure_log_dir(&self) -> Result<Option<PathBuf>, ConfigError> {
        let Some(dir) = self.log_dir() else {
            return Ok(None);
        };
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::LogDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        debug!("Log directory ready: {}", dir.display());
        Ok(Some(dir.to_path_buf()))
    }
}

/// Error monitoring (Sentry DSN), optional
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonitoringConfig {
    pub dsn: Option<String>,
}

impl MonitoringConfig {
    pub fn is_enabled(&self) -> bool {
        self.dsn.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str, file_path: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            file_path: file_path.to_string(),
        }
    }

    #[test]
    fn test_filter_directive_mapping() {
        assert_eq!(logging("INFO", "x.log").filter_directive(), "info");
        assert_eq!(logging("warning", "x.log").filter_directive(), "warn");
        assert_eq!(logging("CRITICAL", "x.log").filter_directive(), "error");
        assert_eq!(logging("bogus", "x.log").filter_directive(), "info");
    }

    #[test]
    fn test_ensure_log_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("nested/logs/trading.log");
        let config = logging("INFO", file.to_str().unwrap());

        let first = config.ensure_log_dir().unwrap();
        let second = config.ensure_log_dir().unwrap();

        assert_eq!(first, second);
        assert!(tmp.path().join("nested/logs").is_dir());
    }

    #[test]
    fn test_bare_file_name_needs_no_directory() {
        let config = logging("INFO", "trading.log");
        assert!(config.log_dir().is_none());
        assert_eq!(config.ensure_log_dir().unwrap(), None);
    }
}
