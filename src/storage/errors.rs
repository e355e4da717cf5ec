//! Record store error types
//!
//! Error codes:
//! - CHIRPY_STORAGE_UNAVAILABLE (FATAL severity)
//! - CHIRPY_STORAGE_WRITE_FAILED (ERROR severity)
//! - CHIRPY_NOT_FOUND (ERROR severity, expected outcome)

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Severity levels for store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, server continues
    Error,
    /// The service must not start
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Which entity a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Chirp,
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Chirp => write!(f, "chirp"),
            EntityKind::User => write!(f, "user"),
        }
    }
}

/// Closed set of failures the record store can report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing file unreadable, unwritable or unparsable at open time.
    #[error("storage unavailable at {}: {reason}", path.display())]
    StorageUnavailable { path: PathBuf, reason: String },

    /// The durable write of a create failed; nothing was committed.
    #[error("durable write failed: {reason}")]
    StorageWriteFailed { reason: String },

    /// No record with the requested id.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: u64 },
}

impl StoreError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        StoreError::StorageUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn write_failed(reason: impl Into<String>) -> Self {
        StoreError::StorageWriteFailed {
            reason: reason.into(),
        }
    }

    /// Stable code string for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::StorageUnavailable { .. } => "CHIRPY_STORAGE_UNAVAILABLE",
            StoreError::StorageWriteFailed { .. } => "CHIRPY_STORAGE_WRITE_FAILED",
            StoreError::NotFound { .. } => "CHIRPY_NOT_FOUND",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            StoreError::StorageUnavailable { .. } => Severity::Fatal,
            StoreError::StorageWriteFailed { .. } => Severity::Error,
            StoreError::NotFound { .. } => Severity::Error,
        }
    }

    /// Returns whether the process must refuse to serve traffic
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::StorageUnavailable { .. } => 503,
            StoreError::StorageWriteFailed { .. } => 500,
            StoreError::NotFound { .. } => 404,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let unavailable = StoreError::unavailable("/tmp/db.json", "corrupt");
        let write = StoreError::write_failed("disk full");
        let missing = StoreError::NotFound {
            kind: EntityKind::Chirp,
            id: 7,
        };

        assert_eq!(unavailable.code(), "CHIRPY_STORAGE_UNAVAILABLE");
        assert_eq!(write.code(), "CHIRPY_STORAGE_WRITE_FAILED");
        assert_eq!(missing.code(), "CHIRPY_NOT_FOUND");
    }

    #[test]
    fn test_only_unavailable_is_fatal() {
        assert!(StoreError::unavailable("db.json", "bad json").is_fatal());
        assert!(!StoreError::write_failed("disk full").is_fatal());
        assert!(!StoreError::NotFound {
            kind: EntityKind::User,
            id: 1
        }
        .is_fatal());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(StoreError::unavailable("db.json", "x").status_code(), 503);
        assert_eq!(StoreError::write_failed("x").status_code(), 500);
        assert_eq!(
            StoreError::NotFound {
                kind: EntityKind::Chirp,
                id: 999
            }
            .status_code(),
            404
        );
    }

    #[test]
    fn test_display_contains_context() {
        let err = StoreError::NotFound {
            kind: EntityKind::Chirp,
            id: 999,
        };
        assert_eq!(err.to_string(), "chirp 999 not found");

        let err = StoreError::unavailable("/data/database.json", "expected value at line 1");
        let display = err.to_string();
        assert!(display.contains("/data/database.json"));
        assert!(display.contains("expected value"));
    }
}
