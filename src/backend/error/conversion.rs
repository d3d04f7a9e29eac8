/**
 * Error Conversion
 *
 * `IntoResponse` implementations for the backend errors. Every error is
 * logged with its classification before the response is built: client
 * errors at `warn`, server errors at `error`.
 *
 * # Response Format
 *
 * ```json
 * { "error": "User not found" }
 * ```
 *
 * Post handlers use `ContentError`, which renders `{ "message": ... }`.
 */

use axum::{
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::backend::error::types::{ApiError, ContentError};

fn log_error(error: &ApiError) {
    let status = error.status_code();
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), error = %error, "Request failed");
    } else {
        tracing::warn!(status = status.as_u16(), error = %error, "Request rejected");
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log_error(&self);
        let body = json!({ "error": self.message() });
        (self.status_code(), Json(body)).into_response()
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        log_error(&self.0);
        let body = json!({ "message": self.message() });
        (self.status_code(), Json(body)).into_response()
    }
}
