//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every
//! handler reports failures the same way. Schedule validation failures also
//! carry the structured error set under `details` for the form to render.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clinicdesk_core::errors::TimeError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `TimeError` instances and implements
/// `IntoResponse` to convert them into HTTP responses.
#[derive(Debug)]
pub struct AppError(pub TimeError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TimeError::NotFound(_) => StatusCode::NOT_FOUND,
            TimeError::Validation(_) => StatusCode::BAD_REQUEST,
            TimeError::InvalidSchedule(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TimeError::Conflict(_) => StatusCode::CONFLICT,
            TimeError::Authentication(_) => StatusCode::UNAUTHORIZED,
            TimeError::Authorization(_) => StatusCode::FORBIDDEN,
            TimeError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TimeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = match &self.0 {
            TimeError::InvalidSchedule(errors) => json!({
                "error": message,
                "details": errors,
            }),
            _ => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

/// Allows `?` on `TimeResult` inside handlers returning `Result<_, AppError>`.
impl From<TimeError> for AppError {
    fn from(err: TimeError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as `TimeError::Database` unless the store
/// already reported a domain error such as a conflict.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        match err.downcast::<TimeError>() {
            Ok(domain) => AppError(domain),
            Err(err) => AppError(TimeError::Database(err)),
        }
    }
}

/// Maps a TimeError to an HTTP response
pub fn map_error(err: TimeError) -> Response {
    AppError(err).into_response()
}
