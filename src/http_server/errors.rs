//! # HTTP Errors
//!
//! Maps record service failures onto status codes and JSON error bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::service::ServiceError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP boundary errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure reported by the record service
    #[error("{0}")]
    Service(#[from] ServiceError),

    /// Update targeted an id that does not exist (reported as 400)
    #[error("Student ID '{0}' not found")]
    UpdateTargetNotFound(String),

    /// Request body is not JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Query string does not decode
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    /// Blocking task failed to complete
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service(err) if !err.is_caller_error() => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(_) => StatusCode::BAD_REQUEST,
            ApiError::UpdateTargetNotFound(_)
            | ApiError::InvalidBody(_)
            | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Treats a missing id as a bad request, the way updates report it
    pub fn for_update(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(id) => ApiError::UpdateTargetNotFound(id),
            other => ApiError::Service(other),
        }
    }
}

/// One violated field in an error body
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub expected: String,
    pub actual: String,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let status = err.status_code();

        // Internal causes stay in the log
        let error = if status.is_server_error() {
            "Internal storage error".to_string()
        } else {
            err.to_string()
        };

        let details = match err {
            ApiError::Service(ServiceError::Validation(schema_err)) => schema_err
                .violations()
                .iter()
                .map(|v| FieldError {
                    field: v.field.clone(),
                    expected: v.expected.clone(),
                    actual: v.actual.clone(),
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            error,
            code: status.as_u16(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            let cause = self.to_string();
            log_event_with_fields(Event::RequestFailed, &[("cause", cause.as_str())]);
        }
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
