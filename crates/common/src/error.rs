//! Common error types shared across crates.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::protocol::ErrorResponse;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::DecryptionFailed`] → 400
/// - [`ServiceError::EncryptionFailure`] → 500
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed: a required field is missing or the body is not valid JSON.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authenticated decryption failed. The cause is deliberately not carried.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Encryption failed; the detail is passed through to the caller.
    #[error("encryption failure: {0}")]
    EncryptionFailure(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::DecryptionFailed => 400,
            ServiceError::EncryptionFailure(_) => 500,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Returns the message exposed to callers in the `error` field.
    pub fn client_message(&self) -> String {
        match self {
            ServiceError::BadRequest(msg) => msg.clone(),
            ServiceError::DecryptionFailed => "Decryption failed".into(),
            ServiceError::EncryptionFailure(detail) => format!("Encryption failed: {detail}"),
            ServiceError::Internal(_) => "Internal server error".into(),
        }
    }

    /// Build the JSON error body for this error.
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.client_message())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_error_response())).into_response()
    }
}
