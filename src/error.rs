//! Error types for the preset server
//!
//! Provides unified error handling using thiserror. The cache engine itself
//! never fails; these errors come from preset loading and the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::{ErrorResponse, MessageResponse};

// == Cache Error Enum ==
/// Unified error type for the preset server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Preset not found
    #[error("Preset not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Endpoint exists but has no behavior yet
    #[error("{0} endpoint is not implemented yet.")]
    NotImplemented(&'static str),

    /// Presets file could not be read
    #[error("Failed to read presets: {0}")]
    Io(#[from] std::io::Error),

    /// Presets file is not valid JSON
    #[error("Failed to parse presets: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CacheError {
    pub fn status(&self) -> StatusCode {
        match self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            CacheError::Io(_) | CacheError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            CacheError::NotImplemented(_) => {
                (status, Json(MessageResponse::new(self.to_string()))).into_response()
            }
            _ => (status, Json(ErrorResponse::new(self.to_string()))).into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the preset server.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            CacheError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CacheError::InvalidRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CacheError::NotImplemented("POST").status(),
            StatusCode::NOT_IMPLEMENTED
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(
            CacheError::from(io).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_implemented_message() {
        let err = CacheError::NotImplemented("PUT");
        assert_eq!(err.to_string(), "PUT endpoint is not implemented yet.");
    }

    #[test]
    fn test_into_response_status() {
        let response = CacheError::NotFound("warm".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
