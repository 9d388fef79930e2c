//! Shared application state injected into every Axum handler.

use crate::key::ServerKey;

/// Application state shared across all request handlers.
///
/// Axum clones the state for each request; [`ServerKey`] is `Arc`-backed so
/// the clone never copies key material.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The process-wide secretbox key, fixed at startup.
    pub key: ServerKey,
}

impl AppState {
    /// Create a new [`AppState`] around the server key.
    pub fn new(key: ServerKey) -> Self {
        Self { key }
    }
}

impl Default for AppState {
    /// Creates an [`AppState`] with a freshly generated key, suitable for tests.
    fn default() -> Self {
        Self::new(ServerKey::generate())
    }
}
