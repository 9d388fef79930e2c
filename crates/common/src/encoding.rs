//! Lenient base64 decoding for caller-supplied binary fields.
//!
//! Callers routinely send keys and ciphertexts in whichever base64 flavour
//! their client library produces: padded or unpadded, standard or URL-safe
//! alphabet (libsodium defaults to URL-safe without padding). All four are
//! accepted. Responses are always encoded with padded standard base64.

use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose},
    DecodeError, Engine as _,
};

const STANDARD_ANY_PADDING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    general_purpose::PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const URL_SAFE_ANY_PADDING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    general_purpose::PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode `encoded` as standard base64, falling back to the URL-safe alphabet.
///
/// # Errors
///
/// Returns the standard decoder's [`DecodeError`] when neither alphabet fits.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    match STANDARD_ANY_PADDING.decode(encoded) {
        Ok(bytes) => Ok(bytes),
        Err(e) => URL_SAFE_ANY_PADDING.decode(encoded).map_err(|_| e),
    }
}
