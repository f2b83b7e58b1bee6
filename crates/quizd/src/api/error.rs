//! Unified API error handling with structured responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Message for request bodies that do not decode.
pub const INVALID_JSON: &str = "invalid json";
/// Message for unknown and expired test ids alike.
pub const INVALID_TEST_ID: &str = "invalid or expired test_id";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";

/// API error type with structured responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    MethodNotAllowed(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn method_not_allowed() -> Self {
        Self::MethodNotAllowed(METHOD_NOT_ALLOWED.to_string())
    }

    pub fn invalid_json() -> Self {
        Self::bad_request(INVALID_JSON)
    }

    pub fn invalid_test_id() -> Self {
        Self::bad_request(INVALID_TEST_ID)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

/// Error body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        debug!(status = status.as_u16(), message = %message, "Client error");

        let body = ErrorResponse {
            success: false,
            error: message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
