use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::jobs::TokenError;
use crate::store::StoreUnavailable;
use star_markup::EncodeError;

/// Request-scoped failure taxonomy of the relay
///
/// Every failing request resolves to exactly one variant; handlers return
/// these and axum turns them into JSON error envelopes.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Print job store unavailable: {0}")]
    Store(#[from] StoreUnavailable),

    #[error("Malformed print job token: {0}")]
    BadToken(#[from] TokenError),

    #[error("Document encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            RelayError::Store(err) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "store_unavailable",
                err.to_string(),
            ),
            RelayError::BadToken(_) => (StatusCode::BAD_REQUEST, "bad_token", self.to_string()),
            RelayError::Encode(_) => (StatusCode::BAD_GATEWAY, "encode_failed", self.to_string()),
            RelayError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            RelayError::Internal(err) => {
                // Log the cause but never expose it
                tracing::error!(error = ?err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
