//! Public key decoding and sealing.

use common::encoding::decode_base64;
use crypto_box::{aead::OsRng, PublicKey};
use thiserror::Error;
use x25519_dalek::EphemeralSecret;

/// Byte length of an X25519 public key (`crypto_box_PUBLICKEYBYTES`).
pub const PUBLIC_KEY_LEN: usize = 32;

/// Bytes a sealed box adds to the plaintext (`crypto_box_SEALBYTES`):
/// the ephemeral public key plus the Poly1305 tag.
pub const SEAL_OVERHEAD: usize = PUBLIC_KEY_LEN + 16;

/// Errors produced while sealing a message.
///
/// The `Display` text of these errors is returned to callers verbatim.
#[derive(Debug, Error)]
pub enum SealError {
    /// The public key is not valid base64.
    #[error("invalid public key encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// The public key decoded to the wrong number of bytes.
    #[error("invalid public key length: expected {PUBLIC_KEY_LEN} bytes, got {0}")]
    InvalidLength(usize),

    /// The public key is a small-order point; every shared secret with it is zero.
    #[error("invalid public key: small-order point")]
    SmallOrder,

    /// The underlying box operation failed.
    #[error("seal operation failed")]
    SealFailure,
}

/// Decode a base64 public key and check that it can be sealed to.
///
/// Standard and URL-safe alphabets are accepted, padded or not.
///
/// # Errors
///
/// Returns [`SealError::InvalidEncoding`], [`SealError::InvalidLength`], or
/// [`SealError::SmallOrder`].
pub fn decode_public_key(encoded: &str) -> Result<PublicKey, SealError> {
    let bytes = decode_base64(encoded)?;
    let key: [u8; PUBLIC_KEY_LEN] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| SealError::InvalidLength(bytes.len()))?;
    ensure_contributory(&key)?;
    Ok(PublicKey::from(key))
}

/// Reject keys whose X25519 exchange yields the all-zero shared secret.
///
/// Clamped scalars are multiples of the cofactor, so one exchange with a
/// throwaway scalar zeroes out exactly the small-order points (and their
/// non-canonical encodings). libsodium refuses the same keys in
/// `crypto_box_seal`.
fn ensure_contributory(key: &[u8; PUBLIC_KEY_LEN]) -> Result<(), SealError> {
    let scratch = EphemeralSecret::random_from_rng(OsRng);
    let shared = scratch.diffie_hellman(&x25519_dalek::PublicKey::from(*key));
    if shared.was_contributory() {
        Ok(())
    } else {
        Err(SealError::SmallOrder)
    }
}

/// Seal `plaintext` to the base64-encoded recipient `public_key`.
///
/// A fresh ephemeral key pair is generated per call, so sealing the same
/// plaintext twice yields different ciphertexts.
///
/// # Errors
///
/// Returns [`SealError`] if the key cannot be decoded or sealing fails.
pub fn seal_to_public_key(public_key: &str, plaintext: &[u8]) -> Result<Vec<u8>, SealError> {
    let recipient = decode_public_key(public_key)?;
    recipient
        .seal(&mut OsRng, plaintext)
        .map_err(|_| SealError::SealFailure)
}
