//! # Validation Errors

use thiserror::Error;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejections raised before a request reaches the store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Chirp is too long")]
    TooLong { length: usize, max: usize },

    #[error("Invalid email: {0}")]
    InvalidEmail(String),
}

impl ValidationError {
    /// Stable code string for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::TooLong { .. } => "CHIRPY_TOO_LONG",
            ValidationError::InvalidEmail(_) => "CHIRPY_INVALID_EMAIL",
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        400
    }
}
