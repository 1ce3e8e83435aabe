//! Error types for the catalog request layer.

use catalog_core::ValidationError;
use serde::Serialize;

use crate::auth::TokenError;

/// Request-layer errors. Each variant maps to one HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Authorization failed: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code a transport adapter should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Unavailable(_) => 503,
            ApiError::Internal(_) => 500,
        }
    }

    /// JSON body for the error response.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            status: self.status_code(),
            error: self.to_string(),
        }
    }
}

/// Serialized error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::InvalidCredentials => ApiError::Unauthorized(error.to_string()),
            TokenError::InvalidToken(msg) => ApiError::Unauthorized(msg),
            TokenError::Signing(msg) => ApiError::Internal(msg),
        }
    }
}
