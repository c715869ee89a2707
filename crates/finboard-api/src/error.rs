//! Error types for finboard-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use finboard_core::{CoreError, ErrorCode};
use thiserror::Error;

/// HTTP-facing error. Bodies are short plain-text markers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Bad input: {message}")]
    BadInput { message: String },

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } | ApiError::BadInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body marker sent to the client
    pub fn marker(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "Not found",
            ApiError::BadRequest { .. } => "Bad request",
            ApiError::BadInput { .. } => "Bad input",
            ApiError::InternalError => "Internal server error",
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        // Server-side details stay in the logs
        if !error.is_client_error() {
            return ApiError::InternalError;
        }
        match error.code() {
            ErrorCode::RecordNotFound => ApiError::NotFound { resource: error.to_string() },
            ErrorCode::BadInput => ApiError::BadInput { message: error.to_string() },
            _ => ApiError::BadRequest { message: error.to_string() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.marker()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let cases = [
            (CoreError::not_found("expense", "e1"), StatusCode::NOT_FOUND, "Not found"),
            (
                CoreError::BadRequest { message: "unknown intent: archive".to_string() },
                StatusCode::BAD_REQUEST,
                "Bad request",
            ),
            (
                CoreError::BadInput { field: "amount".to_string(), reason: "abc".to_string() },
                StatusCode::BAD_REQUEST,
                "Bad input",
            ),
            (CoreError::MissingIdentifier, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            (CoreError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk")), StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        ];

        for (core, status, marker) in cases {
            let api = ApiError::from(core);
            assert_eq!(api.status(), status);
            assert_eq!(api.marker(), marker);
        }
    }

    #[test]
    fn test_status_class_follows_core_classification() {
        let errors = [
            CoreError::not_found("invoice", "i1"),
            CoreError::BadRequest { message: "missing intent".to_string() },
            CoreError::BadInput { field: "title".to_string(), reason: "missing".to_string() },
            CoreError::MissingIdentifier,
            CoreError::StorageError { message: "duplicate id".to_string() },
            CoreError::from(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only")),
        ];

        for core in errors {
            let client = core.is_client_error();
            let status = ApiError::from(core).status();
            assert_eq!(status.is_client_error(), client, "{}", status);
            assert_eq!(status.is_server_error(), !client, "{}", status);
        }
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NotFound { resource: "expense e1".to_string() }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
