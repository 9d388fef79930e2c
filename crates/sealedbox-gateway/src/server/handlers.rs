//! Axum request handlers for all service endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::extract::LenientJson;
use common::protocol::{
    ErrorResponse, HealthResponse, SealedboxEncryptRequest, SealedboxEncryptResponse,
    NO_TEXT_OR_PUBLIC_KEY_PROVIDED,
};
use common::ServiceError;
use tracing::{debug, warn};

use crate::crypto::seal::SEAL_OVERHEAD;
use crate::crypto::seal_to_public_key;

/// `POST /encrypt` — seal `text` to the caller-supplied `publicKey`.
///
/// Failures are reported as `500` with the underlying error text attached.
pub async fn encrypt(LenientJson(req): LenientJson<SealedboxEncryptRequest>) -> Response {
    let Some((text, public_key)) = req.parts() else {
        return ServiceError::BadRequest(NO_TEXT_OR_PUBLIC_KEY_PROVIDED.into()).into_response();
    };

    let sealed = match seal_to_public_key(public_key, text.as_bytes()) {
        Ok(sealed) => sealed,
        Err(e) => {
            warn!(error = %e, "encryption failed");
            return ServiceError::EncryptionFailure(e.to_string()).into_response();
        }
    };

    debug_assert_eq!(sealed.len(), text.len() + SEAL_OVERHEAD);
    debug!(plaintext_len = text.len(), "text sealed");
    let body = SealedboxEncryptResponse {
        encrypted: STANDARD.encode(sealed),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `GET /health` — liveness check.
pub async fn health() -> impl IntoResponse {
    let body = HealthResponse {
        status: "ok".into(),
        service: env!("CARGO_PKG_NAME").into(),
        version: env!("CARGO_PKG_VERSION").into(),
    };
    (StatusCode::OK, Json(body))
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}
