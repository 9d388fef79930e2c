//! Tracing subscriber initialisation with an optional OTLP span exporter.
//!
//! # Telemetry invariants
//!
//! - **No plaintext or key material** may appear in any span attribute or log
//!   field. Handlers log lengths and error kinds only.
//! - The log level comes from the caller's config (`LOG_LEVEL`), overridden by
//!   `RUST_LOG` when set.

use anyhow::{Context, Result};
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Identity of the binary reported on exported spans.
#[derive(Debug, Clone, Copy)]
pub struct ServiceInfo {
    /// Binary name, e.g. `"secretbox-gateway"`.
    pub name: &'static str,
    /// Crate version of the binary.
    pub version: &'static str,
}

/// Initialise the global tracing subscriber.
///
/// Configures:
/// - A JSON-formatted [`tracing_subscriber`] layer writing to stdout.
/// - When `otlp_endpoint` is set, a [`tracing_opentelemetry`] layer that
///   exports spans over OTLP/gRPC, tagged with `service`.
///
/// Must be called from within a Tokio runtime when an endpoint is given.
///
/// # Errors
///
/// Returns an error if the OTLP pipeline cannot be installed or a global
/// subscriber is already set.
pub fn init_telemetry(
    service: ServiceInfo,
    otlp_endpoint: Option<&str>,
    log_level: &str,
) -> Result<()> {
    let otel_layer = match otlp_endpoint {
        Some(endpoint) => {
            let tracer = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(
                    opentelemetry_otlp::new_exporter()
                        .tonic()
                        .with_endpoint(endpoint),
                )
                .with_trace_config(
                    opentelemetry_sdk::trace::Config::default()
                        .with_resource(service_resource(service)),
                )
                .install_batch(runtime::Tokio)
                .context("failed to install OTLP tracing pipeline")?;
            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer().json())
        .with(otel_layer)
        .try_init()
        .with_context(|| format!("failed to initialise {} tracing subscriber", service.name))?;

    Ok(())
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

fn service_resource(service: ServiceInfo) -> Resource {
    Resource::new(vec![
        KeyValue::new(
            opentelemetry_semantic_conventions::resource::SERVICE_NAME,
            service.name,
        ),
        KeyValue::new(
            opentelemetry_semantic_conventions::resource::SERVICE_VERSION,
            service.version,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE: ServiceInfo = ServiceInfo {
        name: "test-gateway",
        version: "0.0.0",
    };

    #[test]
    fn second_init_fails() {
        // The first call may lose a race with another test; the second never succeeds.
        let _ = init_telemetry(SERVICE, None, "info");
        let err = init_telemetry(SERVICE, None, "info").unwrap_err();
        assert!(err.to_string().contains("test-gateway"));
    }
}
