//! Email sanity check for user creation

use super::errors::{ValidationError, ValidationResult};

/// Trims and checks for a non-empty local part and domain around one `@`.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(email.to_string())
        }
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}
