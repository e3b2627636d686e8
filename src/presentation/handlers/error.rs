use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::ValidationError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Error returned by every handler. Only client-caused failures carry a
/// precise message; internal failures are logged before being mapped here.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, message)
    }

    pub fn validation(err: ValidationError) -> Self {
        tracing::warn!(error = %err, "Validation error");
        Self::bad_request("Validation error", err.to_string())
    }

    pub fn invalid_json() -> Self {
        Self::bad_request("Invalid request", "JSON payload required")
    }

    pub fn configuration() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Configuration error",
            "Groq API key not configured",
        )
    }

    pub fn internal(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.error,
                message: self.message,
            }),
        )
            .into_response()
    }
}
