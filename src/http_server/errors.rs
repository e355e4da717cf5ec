//! HTTP error mapping
//!
//! Every failure leaves the handler layer as `{"error": ..., "code": ...}`
//! with the status its source error declares.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StoreError;
use crate::validation::ValidationError;

/// Error body returned by every route
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Store(e) => e.code(),
            ApiError::Validation(e) => e.code(),
            ApiError::BadRequest(_) => "CHIRPY_BAD_REQUEST",
            ApiError::Internal(_) => "CHIRPY_INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        let code = match self {
            ApiError::Store(e) => e.status_code(),
            ApiError::Validation(e) => e.status_code(),
            ApiError::BadRequest(_) => 400,
            ApiError::Internal(_) => 500,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::EntityKind;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(StoreError::NotFound {
            kind: EntityKind::Chirp,
            id: 1,
        });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let too_long = ApiError::from(ValidationError::TooLong {
            length: 200,
            max: 140,
        });
        assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);
        assert_eq!(too_long.to_string(), "Chirp is too long");

        assert_eq!(
            ApiError::BadRequest("bad id".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_codes_pass_through() {
        let err = ApiError::from(StoreError::StorageWriteFailed {
            reason: "disk full".into(),
        });
        assert_eq!(err.code(), "CHIRPY_STORAGE_WRITE_FAILED");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
