//! XSalsa20-Poly1305 (NaCl secretbox) encryption and decryption of messages.
//!
//! Every call to [`encrypt_message`] draws a fresh 192-bit nonce from the OS
//! CSPRNG. The nonce is large enough that random generation will not repeat
//! under one key in practice, which is what keeps a long-lived server key safe.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::encoding::decode_base64;
use crypto_secretbox::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Key, Nonce, XSalsa20Poly1305,
};
use thiserror::Error;

use crate::key::ServerKey;

/// Byte length of a secretbox key (`crypto_secretbox_KEYBYTES`).
pub const KEY_LEN: usize = 32;

/// Byte length of a secretbox nonce (`crypto_secretbox_NONCEBYTES`).
pub const NONCE_LEN: usize = 24;

/// Byte length of the Poly1305 authentication tag (`crypto_secretbox_MACBYTES`).
pub const TAG_LEN: usize = 16;

/// Output of one encryption: the nonce and the ciphertext it pairs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl SealedMessage {
    /// Base64 encoding of the nonce.
    pub fn nonce_b64(&self) -> String {
        STANDARD.encode(self.nonce)
    }

    /// Base64 encoding of the ciphertext.
    pub fn ciphertext_b64(&self) -> String {
        STANDARD.encode(&self.ciphertext)
    }

    /// Decode a base64 nonce/ciphertext pair as submitted by a caller.
    ///
    /// Padded or unpadded input in either the standard or URL-safe alphabet is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidEncoding`] if either value is not valid
    /// base64, or [`CipherError::InvalidNonceLength`] if the nonce does not
    /// decode to [`NONCE_LEN`] bytes.
    pub fn from_base64(nonce: &str, ciphertext: &str) -> Result<Self, CipherError> {
        let nonce_bytes =
            decode_base64(nonce).map_err(|_| CipherError::InvalidEncoding("nonce"))?;
        let nonce: [u8; NONCE_LEN] = nonce_bytes
            .as_slice()
            .try_into()
            .map_err(|_| CipherError::InvalidNonceLength(nonce_bytes.len()))?;

        let ciphertext =
            decode_base64(ciphertext).map_err(|_| CipherError::InvalidEncoding("ciphertext"))?;

        Ok(Self { nonce, ciphertext })
    }
}

/// Errors produced by the cipher layer.
///
/// These are logged server-side only; callers of the decrypt endpoint see a
/// single generic failure.
#[derive(Debug, Error)]
pub enum CipherError {
    /// A submitted field is not valid base64.
    #[error("{0} is not valid base64")]
    InvalidEncoding(&'static str),

    /// The nonce decoded to the wrong number of bytes.
    #[error("invalid nonce length: expected {NONCE_LEN} bytes, got {0}")]
    InvalidNonceLength(usize),

    /// The ciphertext is shorter than the authentication tag.
    #[error("ciphertext too short: expected at least {TAG_LEN} bytes, got {0}")]
    Truncated(usize),

    /// Encryption or authenticated decryption failed.
    #[error("aead operation failed")]
    AeadFailure,
}

/// Encrypt `plaintext` under `key` with a freshly generated nonce.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error (unreachable
/// with a valid key and nonce).
pub fn encrypt_message(plaintext: &[u8], key: &ServerKey) -> Result<SealedMessage, CipherError> {
    let cipher = build_cipher(key);
    let nonce = XSalsa20Poly1305::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| CipherError::AeadFailure)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    nonce_bytes.copy_from_slice(&nonce);

    Ok(SealedMessage {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Decrypt a [`SealedMessage`] back to plaintext bytes.
///
/// # Errors
///
/// Returns [`CipherError::Truncated`] if the ciphertext cannot hold a tag, or
/// [`CipherError::AeadFailure`] if authentication fails (wrong key, wrong
/// nonce, or tampered data).
pub fn decrypt_message(sealed: &SealedMessage, key: &ServerKey) -> Result<Vec<u8>, CipherError> {
    if sealed.ciphertext.len() < TAG_LEN {
        return Err(CipherError::Truncated(sealed.ciphertext.len()));
    }
    let cipher = build_cipher(key);
    let nonce = Nonce::from_slice(&sealed.nonce);
    cipher
        .decrypt(nonce, sealed.ciphertext.as_ref())
        .map_err(|_| CipherError::AeadFailure)
}

fn build_cipher(key: &ServerKey) -> XSalsa20Poly1305 {
    XSalsa20Poly1305::new(Key::from_slice(key.as_bytes()))
}
