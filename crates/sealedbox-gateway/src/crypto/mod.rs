//! Sealed-box (anonymous public-key) encryption.
//!
//! # Ciphertext format
//!
//! ```text
//! ephemeral_pk (32) || XSalsa20-Poly1305 box (plaintext + 16-byte tag)
//! ```
//!
//! Compatible with libsodium's `crypto_box_seal`: the box nonce is derived
//! from `BLAKE2b(ephemeral_pk || recipient_pk)`, so no nonce travels with the
//! ciphertext. Opening requires the recipient's secret key, which this service
//! never holds.

pub mod seal;

pub use seal::seal_to_public_key;
