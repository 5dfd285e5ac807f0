//! Error-to-HTTP mapping.
//!
//! Caller errors map to 400, everything else to 500, always with the
//! descriptive message preserved in a `{"detail": ...}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use firlens_core::FirlensError;

/// Wrapper turning a [`FirlensError`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub FirlensError);

impl From<FirlensError> for ApiError {
    fn from(err: FirlensError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_caller_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
