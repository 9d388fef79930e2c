//! NaCl secretbox primitives.
//!
//! This module is free of HTTP dependencies. It provides the encrypt/decrypt
//! operations used by the request handlers.
//!
//! # Wire format
//!
//! ```text
//! nonce      = base64(24 random bytes)
//! ciphertext = base64(XSalsa20-Poly1305(key, nonce, plaintext))   // plaintext + 16-byte tag
//! ```
//!
//! The two values are only meaningful as the pair returned by one encrypt call.

pub mod cipher;

pub use cipher::KEY_LEN;
