//! Error handlers
//!
//! Maps gate errors onto HTTP responses for the host framework.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;

use crate::error::types::GateError;

/// Handle a gate error
pub fn handle_error(err: &GateError) {
    error!("Password gate error: {}", err);
}

/// Convert error to HTTP status code
pub fn error_to_status(err: &GateError) -> StatusCode {
    match err {
        GateError::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
        GateError::Config(_) | GateError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        GateError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        GateError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        handle_error(&self);
        // The body stays generic; details only go to the log.
        let status = error_to_status(&self);
        (status, status.canonical_reason().unwrap_or("Error")).into_response()
    }
}
