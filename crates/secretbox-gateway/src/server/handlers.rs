//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::extract::LenientJson;
use common::protocol::{
    ErrorResponse, HealthResponse, SecretboxDecryptRequest, SecretboxDecryptResponse,
    SecretboxEncryptRequest, SecretboxEncryptResponse, NONCE_OR_CIPHERTEXT_NOT_PROVIDED,
    NO_MESSAGE_PROVIDED,
};
use common::ServiceError;
use tracing::{debug, error, warn};

use super::state::AppState;
use crate::crypto::cipher::{decrypt_message, encrypt_message, SealedMessage};

/// `POST /encrypt` — encrypt `message` under the server key.
///
/// Each call uses a fresh random nonce, so identical messages never produce
/// the same output.
pub async fn encrypt(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<SecretboxEncryptRequest>,
) -> Response {
    let Some(message) = req.message() else {
        return ServiceError::BadRequest(NO_MESSAGE_PROVIDED.into()).into_response();
    };

    let sealed = match encrypt_message(message.as_bytes(), &state.key) {
        Ok(sealed) => sealed,
        Err(e) => {
            error!(error = %e, "encryption failed");
            return ServiceError::Internal(e.to_string()).into_response();
        }
    };

    debug!(plaintext_len = message.len(), "message encrypted");
    let body = SecretboxEncryptResponse {
        nonce: sealed.nonce_b64(),
        ciphertext: sealed.ciphertext_b64(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `POST /decrypt` — recover the message from a nonce/ciphertext pair.
///
/// Every decoding or authentication failure yields the same
/// `Decryption failed` response; the cause is only logged.
pub async fn decrypt(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<SecretboxDecryptRequest>,
) -> Response {
    let Some((nonce, ciphertext)) = req.parts() else {
        return ServiceError::BadRequest(NONCE_OR_CIPHERTEXT_NOT_PROVIDED.into()).into_response();
    };

    let plaintext = match SealedMessage::from_base64(nonce, ciphertext)
        .and_then(|sealed| decrypt_message(&sealed, &state.key))
    {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "decryption failed");
            return ServiceError::DecryptionFailed.into_response();
        }
    };

    let body = SecretboxDecryptResponse {
        message: String::from_utf8_lossy(&plaintext).into_owned(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `GET /health` — liveness check.
///
/// The key is generated before the listener binds, so a responding server is
/// always ready.
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::routing::post;
    use axum::Router;
    use axum_test::TestServer;
    use base64::{
        engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
        Engine as _,
    };
    use serde_json::{json, Value};

    fn test_server() -> TestServer {
        let app = Router::new()
            .route("/encrypt", post(encrypt))
            .route("/decrypt", post(decrypt))
            .with_state(AppState::default());
        TestServer::new(app).unwrap()
    }

    async fn encrypt_via(server: &TestServer, message: &str) -> SecretboxEncryptResponse {
        let resp = server.post("/encrypt").json(&json!({ "message": message })).await;
        resp.assert_status_ok();
        resp.json::<SecretboxEncryptResponse>()
    }

    #[tokio::test]
    async fn encrypt_then_decrypt_round_trip() {
        let server = test_server();
        for message in ["hello", "こんにちは世界", "a much longer message with spaces and symbols !@#"] {
            let sealed = encrypt_via(&server, message).await;
            let resp = server
                .post("/decrypt")
                .json(&json!({ "nonce": sealed.nonce, "ciphertext": sealed.ciphertext }))
                .await;
            resp.assert_status_ok();
            assert_eq!(resp.json::<Value>(), json!({ "message": message }));
        }
    }

    #[tokio::test]
    async fn encrypt_is_non_deterministic() {
        let server = test_server();
        let a = encrypt_via(&server, "same input").await;
        let b = encrypt_via(&server, "same input").await;
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[tokio::test]
    async fn encrypt_returns_24_byte_nonce() {
        let server = test_server();
        let sealed = encrypt_via(&server, "hi").await;
        assert_eq!(STANDARD.decode(&sealed.nonce).unwrap().len(), 24);
        assert_eq!(STANDARD.decode(&sealed.ciphertext).unwrap().len(), 2 + 16);
    }

    #[tokio::test]
    async fn encrypt_without_message_is_400() {
        let server = test_server();
        let resp = server.post("/encrypt").json(&json!({})).await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<Value>(), json!({ "error": "No message provided" }));
    }

    #[tokio::test]
    async fn encrypt_with_empty_message_is_400() {
        let server = test_server();
        let resp = server.post("/encrypt").json(&json!({ "message": "" })).await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<Value>(), json!({ "error": "No message provided" }));
    }

    #[tokio::test]
    async fn decrypt_without_ciphertext_is_400() {
        let server = test_server();
        let resp = server.post("/decrypt").json(&json!({ "nonce": "x" })).await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.json::<Value>(),
            json!({ "error": "Nonce or ciphertext not provided" })
        );
    }

    #[tokio::test]
    async fn decrypt_with_mismatched_nonce_fails() {
        let server = test_server();
        let a = encrypt_via(&server, "message").await;
        let b = encrypt_via(&server, "message").await;
        let resp = server
            .post("/decrypt")
            .json(&json!({ "nonce": b.nonce, "ciphertext": a.ciphertext }))
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<Value>(), json!({ "error": "Decryption failed" }));
    }

    #[tokio::test]
    async fn decrypt_tampered_ciphertext_fails() {
        let server = test_server();
        let sealed = encrypt_via(&server, "do not touch").await;
        let mut bytes = STANDARD.decode(&sealed.ciphertext).unwrap();
        bytes[0] ^= 0x80;
        let resp = server
            .post("/decrypt")
            .json(&json!({ "nonce": sealed.nonce, "ciphertext": STANDARD.encode(bytes) }))
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<Value>(), json!({ "error": "Decryption failed" }));
    }

    #[tokio::test]
    async fn decrypt_under_other_key_fails() {
        let sealed = encrypt_via(&test_server(), "restart me").await;
        let resp = test_server()
            .post("/decrypt")
            .json(&json!({ "nonce": sealed.nonce, "ciphertext": sealed.ciphertext }))
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<Value>(), json!({ "error": "Decryption failed" }));
    }

    #[tokio::test]
    async fn decrypt_failures_are_indistinguishable() {
        let server = test_server();
        let sealed = encrypt_via(&server, "oracle").await;
        let short_nonce = STANDARD.encode([0u8; 8]);
        let cases = [
            json!({ "nonce": "%%%", "ciphertext": sealed.ciphertext }),
            json!({ "nonce": short_nonce, "ciphertext": sealed.ciphertext }),
            json!({ "nonce": sealed.nonce, "ciphertext": "AAAA" }),
        ];
        for body in cases {
            let resp = server.post("/decrypt").json(&body).await;
            resp.assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(resp.json::<Value>(), json!({ "error": "Decryption failed" }));
        }
    }

    #[tokio::test]
    async fn encrypt_with_null_message_is_400() {
        let server = test_server();
        let resp = server.post("/encrypt").json(&json!({ "message": null })).await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<Value>(), json!({ "error": "No message provided" }));
    }

    #[tokio::test]
    async fn encrypt_with_empty_body_is_missing_message() {
        let server = test_server();
        let resp = server
            .post("/encrypt")
            .bytes(Bytes::new())
            .content_type("application/json")
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<Value>(), json!({ "error": "No message provided" }));
    }

    #[tokio::test]
    async fn encrypt_with_non_json_body_is_missing_message() {
        let server = test_server();
        let resp = server.post("/encrypt").text("message=hello").await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<Value>(), json!({ "error": "No message provided" }));
    }

    #[tokio::test]
    async fn decrypt_with_empty_body_is_missing_fields() {
        let server = test_server();
        let resp = server
            .post("/decrypt")
            .bytes(Bytes::new())
            .content_type("application/json")
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.json::<Value>(),
            json!({ "error": "Nonce or ciphertext not provided" })
        );
    }

    #[tokio::test]
    async fn decrypt_accepts_url_safe_unpadded_fields() {
        let server = test_server();
        let sealed = encrypt_via(&server, "lenient decoding").await;
        let nonce = URL_SAFE_NO_PAD.encode(STANDARD.decode(&sealed.nonce).unwrap());
        let ciphertext = URL_SAFE_NO_PAD.encode(STANDARD.decode(&sealed.ciphertext).unwrap());
        let resp = server
            .post("/decrypt")
            .json(&json!({ "nonce": nonce, "ciphertext": ciphertext }))
            .await;
        resp.assert_status_ok();
        assert_eq!(resp.json::<Value>(), json!({ "message": "lenient decoding" }));
    }

    #[tokio::test]
    async fn malformed_json_is_400_json() {
        let server = test_server();
        let resp = server
            .post("/encrypt")
            .bytes(Bytes::from_static(b"{not json"))
            .content_type("application/json")
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let error = resp.json::<Value>()["error"].as_str().unwrap().to_owned();
        assert!(error.starts_with("Invalid request body: "), "got {error}");
        assert!(!error.contains("Content-Type"), "got {error}");
    }
}
