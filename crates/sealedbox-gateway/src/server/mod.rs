//! Axum HTTP server and routing.

pub mod handlers;
pub mod router;
