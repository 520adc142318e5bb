//! Error-to-HTTP mapping for the REST boundary.
//!
//! Domain errors become the JSON error envelope the service has always
//! spoken: `{"message": ..., "error": ..., "statusCode": ...}` where
//! `message` is an array of field violations for validation failures and a
//! single string otherwise.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use clinica_core::ClinicaError;
use serde::Serialize;
use utoipa::ToSchema;

/// One string for most failures, an array for validation failures.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// JSON error envelope returned on every failed request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: ErrorMessage,
    pub error: String,
    pub status_code: u16,
}

/// Response-side wrapper around [`ClinicaError`].
#[derive(Debug)]
pub struct ApiError(pub ClinicaError);

impl ApiError {
    /// A 400 carrying a single message, used for malformed request bodies.
    pub fn bad_request(message: String) -> Self {
        ApiError(ClinicaError::invalid_input(vec![message]))
    }
}

impl From<ClinicaError> for ApiError {
    fn from(err: ClinicaError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self.0 {
            ClinicaError::InvalidInput(violations) => (
                StatusCode::BAD_REQUEST,
                "Bad Request",
                ErrorMessage::Many(violations),
            ),
            err @ ClinicaError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                "Not Found",
                ErrorMessage::One(err.to_string()),
            ),
            ClinicaError::ConstraintViolation(err) => {
                tracing::warn!("constraint violation: {err}");
                (
                    StatusCode::CONFLICT,
                    "Conflict",
                    ErrorMessage::One(err.to_string()),
                )
            }
            ClinicaError::Database(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    ErrorMessage::One("Internal server error".into()),
                )
            }
        };

        let body = ErrorBody {
            message,
            error: error.into(),
            status_code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
