//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;

use crate::storage::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, runtime, listener)
    IoError,
    /// Database file already exists
    AlreadyInitialized,
    /// Startup failed; the service did not serve traffic
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CHIRPY_CLI_CONFIG_ERROR",
            Self::IoError => "CHIRPY_CLI_IO_ERROR",
            Self::AlreadyInitialized => "CHIRPY_CLI_ALREADY_INITIALIZED",
            Self::BootFailed => "CHIRPY_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn already_initialized(path: &str) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Database already exists at {}", path),
        )
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::boot_failed(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("port must be > 0");
        assert_eq!(
            err.to_string(),
            "CHIRPY_CLI_CONFIG_ERROR: port must be > 0"
        );
    }

    #[test]
    fn test_store_error_is_boot_failure() {
        let err = CliError::from(StoreError::StorageUnavailable {
            path: "db.json".into(),
            reason: "malformed".into(),
        });
        assert_eq!(err.code(), &CliErrorCode::BootFailed);
        assert!(err.message().contains("malformed"));
    }

    #[test]
    fn test_io_error_code() {
        let err = CliError::io_error("address in use");
        assert_eq!(err.code(), &CliErrorCode::IoError);
        assert!(err.to_string().starts_with("CHIRPY_CLI_IO_ERROR"));
    }
}
