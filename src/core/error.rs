//! Error type system for the student registry
//!
//! Every fallible operation returns [`RegistryError`]. The HTTP boundary maps
//! it once to a status code and a JSON body through [`IntoResponse`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main error type for the registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    // System-level errors
    #[error("System initialization failed: {0}")]
    InitializationError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task error: {0}")]
    TaskError(String),

    #[error("Crypto error: {0}")]
    CryptoError(String),

    // Request errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Carries the rejected roll number for logging only.
    #[error("Roll number already exists")]
    DuplicateRollNo(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl RegistryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::ValidationError(_) | RegistryError::DuplicateRollNo(_) => {
                StatusCode::BAD_REQUEST
            }

            RegistryError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,

            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,

            RegistryError::InitializationError(_)
            | RegistryError::DatabaseError(_)
            | RegistryError::PoolError(_)
            | RegistryError::IoError(_)
            | RegistryError::TaskError(_)
            | RegistryError::CryptoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type name for API responses
    pub fn error_type(&self) -> &'static str {
        match self {
            RegistryError::InitializationError(_) => "InitializationError",
            RegistryError::DatabaseError(_) => "DatabaseError",
            RegistryError::PoolError(_) => "PoolError",
            RegistryError::IoError(_) => "IoError",
            RegistryError::TaskError(_) => "TaskError",
            RegistryError::CryptoError(_) => "CryptoError",
            RegistryError::ValidationError(_) => "ValidationError",
            RegistryError::DuplicateRollNo(_) => "DuplicateRollNo",
            RegistryError::AuthenticationError(_) => "AuthenticationError",
            RegistryError::NotFound(_) => "NotFound",
        }
    }

    /// Client-facing message, without the category prefix used in logs
    pub fn message(&self) -> String {
        match self {
            RegistryError::InitializationError(msg)
            | RegistryError::TaskError(msg)
            | RegistryError::CryptoError(msg)
            | RegistryError::ValidationError(msg)
            | RegistryError::AuthenticationError(msg)
            | RegistryError::NotFound(msg) => msg.clone(),
            RegistryError::DatabaseError(e) => e.to_string(),
            RegistryError::PoolError(e) => e.to_string(),
            RegistryError::IoError(e) => e.to_string(),
            RegistryError::DuplicateRollNo(_) => self.to_string(),
        }
    }
}

/// Error body returned on every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn from_error(error: &RegistryError) -> Self {
        Self {
            error: error.error_type().to_string(),
            message: error.message(),
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(
                error_type = self.error_type(),
                status_code = %status_code,
                "Request failed: {}",
                self
            );
        } else {
            tracing::warn!(
                error_type = self.error_type(),
                status_code = %status_code,
                "Request rejected: {}",
                self
            );
        }

        (status_code, Json(ErrorResponse::from_error(&self))).into_response()
    }
}

/// Result type alias for operations that can fail with RegistryError
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            RegistryError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RegistryError::DuplicateRollNo("R1".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RegistryError::AuthenticationError("test".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            RegistryError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RegistryError::DatabaseError(rusqlite::Error::InvalidQuery).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RegistryError::CryptoError("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_drops_category_prefix() {
        let error = RegistryError::AuthenticationError("Token missing".into());
        assert_eq!(error.message(), "Token missing");
        assert_eq!(error.to_string(), "Authentication failed: Token missing");
    }

    #[test]
    fn test_duplicate_message_hides_roll_no() {
        let error = RegistryError::DuplicateRollNo("R1".into());
        assert_eq!(error.message(), "Roll number already exists");
        assert_eq!(error.error_type(), "DuplicateRollNo");
    }

    #[test]
    fn test_error_response_creation() {
        let error = RegistryError::NotFound("Student not found".into());
        let response = ErrorResponse::from_error(&error);

        assert_eq!(response.error, "NotFound");
        assert_eq!(response.message, "Student not found");
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = RegistryError::ValidationError("name is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "ValidationError");
        assert_eq!(body.message, "name is required");
    }
}
