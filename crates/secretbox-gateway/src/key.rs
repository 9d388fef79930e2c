//! [`ServerKey`]: the process-wide secretbox key.
//!
//! # Lifecycle
//!
//! 1. `main` calls [`ServerKey::generate`] once, before the listener binds.
//! 2. The key is moved into the router state and shared by every handler.
//! 3. It is never replaced, persisted, logged, or returned by any endpoint.
//!    Ciphertexts produced before a restart cannot be decrypted afterwards.

use std::sync::Arc;

use crypto_secretbox::aead::{rand_core::RngCore, OsRng};
use zeroize::Zeroize;

use crate::crypto::KEY_LEN;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// The memory is zeroed on drop.
struct KeyBytes(Box<[u8; KEY_LEN]>);

impl Drop for KeyBytes {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Read-only secretbox key shared across all request handlers.
///
/// Cloning is cheap: clones share one `Arc`-backed buffer, and the buffer is
/// wiped when the last clone is dropped. Since the key never changes after
/// construction, readers need no lock.
#[derive(Clone)]
pub struct ServerKey {
    inner: Arc<KeyBytes>,
}

impl ServerKey {
    /// Generate a fresh key from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut buf = Box::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(&mut buf[..]);
        Self {
            inner: Arc::new(KeyBytes(buf)),
        }
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.inner.0
    }
}

impl std::fmt::Debug for ServerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("ServerKey([REDACTED])")
    }
}
