//! Request and response types exchanged with gateway callers.
//!
//! Every body is JSON. Binary values (nonces, ciphertexts, public keys) travel
//! as standard base64 strings.

use serde::{Deserialize, Serialize};

/// Error text for a secretbox encrypt request without a message.
pub const NO_MESSAGE_PROVIDED: &str = "No message provided";

/// Error text for a secretbox decrypt request missing either field.
pub const NONCE_OR_CIPHERTEXT_NOT_PROVIDED: &str = "Nonce or ciphertext not provided";

/// Error text for a sealed-box encrypt request missing either field.
pub const NO_TEXT_OR_PUBLIC_KEY_PROVIDED: &str = "No text or publicKey provided";

/// Treats an absent or empty string field as missing.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Secretbox endpoints
// ---------------------------------------------------------------------------

/// Request body for the secretbox `POST /encrypt`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretboxEncryptRequest {
    /// Plaintext to encrypt.
    pub message: Option<String>,
}

impl SecretboxEncryptRequest {
    /// The message, if present and non-empty.
    pub fn message(&self) -> Option<&str> {
        present(&self.message)
    }
}

/// Successful response body for the secretbox `POST /encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretboxEncryptResponse {
    /// Base64 nonce generated for this call.
    pub nonce: String,
    /// Base64 ciphertext including the authentication tag.
    pub ciphertext: String,
}

/// Request body for the secretbox `POST /decrypt`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretboxDecryptRequest {
    /// Base64 nonce returned by the encrypt call.
    pub nonce: Option<String>,
    /// Base64 ciphertext returned by the same encrypt call.
    pub ciphertext: Option<String>,
}

impl SecretboxDecryptRequest {
    /// Both fields, if each is present and non-empty.
    pub fn parts(&self) -> Option<(&str, &str)> {
        Some((present(&self.nonce)?, present(&self.ciphertext)?))
    }
}

/// Successful response body for the secretbox `POST /decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretboxDecryptResponse {
    /// Recovered plaintext.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Sealed-box endpoint
// ---------------------------------------------------------------------------

/// Request body for the sealed-box `POST /encrypt`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedboxEncryptRequest {
    /// Plaintext to seal.
    pub text: Option<String>,
    /// Base64 X25519 public key of the recipient.
    pub public_key: Option<String>,
}

impl SealedboxEncryptRequest {
    /// `(text, public_key)`, if each is present and non-empty.
    pub fn parts(&self) -> Option<(&str, &str)> {
        Some((present(&self.text)?, present(&self.public_key)?))
    }
}

/// Successful response body for the sealed-box `POST /encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedboxEncryptResponse {
    /// Base64 sealed ciphertext (ephemeral public key followed by the box).
    pub encrypted: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description safe to expose to callers.
    pub error: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` once the server is accepting requests.
    pub status: String,
    /// Name of the gateway binary answering.
    pub service: String,
    /// Crate version of the gateway binary.
    pub version: String,
}
