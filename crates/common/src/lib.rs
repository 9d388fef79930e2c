//! Common types, protocol definitions, errors, and HTTP glue shared by the
//! `sodium-gateway` binaries.

pub mod encoding;
pub mod error;
pub mod extract;
pub mod protocol;
pub mod telemetry;

pub use error::ServiceError;
