//! Custom error types for the Minarca client
//!
//! This module defines the error hierarchy for the configuration subsystem
//! using thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Minarca client operations
#[derive(Error, Debug)]
pub enum MinarcaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors (atomic writes, file decoding)
    #[error("Storage error: {0}")]
    Storage(String),

    /// A line of the patterns file is neither a comment nor a rule
    #[error("invalid pattern on line {line_number}: {line:?}")]
    InvalidPattern { line_number: usize, line: String },

    /// A backup run is already recorded as running
    #[error("Backup already running{}", pid_suffix(.pid))]
    Running { pid: Option<u32> },

    /// No backup run is recorded as running
    #[error("Backup is not running")]
    NotRunning,

    /// A required setting has not been configured yet
    #[error("Not configured: {0}")]
    NotConfigured(&'static str),
}

impl MinarcaError {
    /// Create an invalid pattern error for the given raw line
    pub fn invalid_pattern(line_number: usize, line: impl Into<String>) -> Self {
        Self::InvalidPattern {
            line_number,
            line: line.into(),
        }
    }

    /// Check if this is an invalid pattern error
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }

    /// Check if this error reports an already running backup
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

fn pid_suffix(pid: &Option<u32>) -> String {
    pid.map(|p| format!(" (pid {})", p)).unwrap_or_default()
}

impl From<std::io::Error> for MinarcaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MinarcaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Minarca client operations
pub type MinarcaResult<T> = Result<T, MinarcaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MinarcaError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_invalid_pattern_error_carries_line() {
        let err = MinarcaError::invalid_pattern(3, "*C:/foo");
        assert_eq!(err.to_string(), "invalid pattern on line 3: \"*C:/foo\"");
        assert!(err.is_invalid_pattern());
    }

    #[test]
    fn test_running_error() {
        let err = MinarcaError::Running { pid: Some(42) };
        assert_eq!(err.to_string(), "Backup already running (pid 42)");
        assert!(err.is_running());

        let err = MinarcaError::Running { pid: None };
        assert_eq!(err.to_string(), "Backup already running");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MinarcaError = io_err.into();
        assert!(matches!(err, MinarcaError::Io(_)));
    }
}
