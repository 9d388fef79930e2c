//! `sealedbox-gateway` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`](config::Config) from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP spans).
//! 3. Build the Axum router and start the HTTP server.

mod config;
mod crypto;
mod server;

use std::time::Duration;

use anyhow::Result;
use common::telemetry::{self, ServiceInfo};
use tracing::{debug, info};

const SERVICE: ServiceInfo = ServiceInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        eprintln!("ERROR: sealedbox-gateway configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(
        SERVICE,
        cfg.otel_exporter_otlp_endpoint.as_deref(),
        &cfg.log_level,
    )?;
    debug!(
        version = SERVICE.version,
        listen_port = cfg.listen_port,
        "sealedbox-gateway starting"
    );

    // -----------------------------------------------------------------------
    // 3. HTTP server
    // -----------------------------------------------------------------------
    let router = server::router::build(Duration::from_secs(cfg.request_timeout_secs));

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, version = SERVICE.version, "listening");

    axum::serve(listener, router).await?;

    Ok(())
}
