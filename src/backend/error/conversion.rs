/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse`, so handlers return
 * `Result<_, BackendError>` directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "outcome": "NotFound",
 *   "message": "Collection 6f1c... not found",
 *   "status": 404
 * }
 * ```
 */

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::backend::error::types::BackendError;
use crate::shared::{Outcome, SharedError};

/// Failure envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub outcome: Outcome,
    pub message: String,
    pub status: u16,
}

impl From<&BackendError> for ErrorBody {
    fn from(err: &BackendError) -> Self {
        Self {
            outcome: err.outcome(),
            message: err.message(),
            status: err.status_code().as_u16(),
        }
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

/// Malformed request bodies are input errors like any other
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        BackendError::Invalid(SharedError::serialization(rejection.body_text()))
    }
}
