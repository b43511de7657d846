//! Request Inspector entry point.
//!
//! This is the main entry point for running the request inspector HTTP server.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inspector_common::InspectorConfig;
use inspector_server::InspectorServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,request_inspector=debug,inspector_server=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    info!("Starting Request Inspector");

    // Load configuration
    let config_path = std::env::var("INSPECTOR_CONFIG").ok();
    let config = InspectorConfig::load(config_path.as_deref(), std::env::var("BIND_ADDR").ok())
        .context("Failed to load configuration")?;

    info!(
        bind_addr = %config.server.bind_addr,
        edge_metadata_file = ?config.edge.metadata_file,
        "Configuration loaded"
    );

    let server = InspectorServer::new(&config).context(
        "Invalid configuration. BIND_ADDR expects 'host:port' (e.g., '0.0.0.0:8080')",
    )?;

    info!("Server initialized. Available endpoints:");
    info!("  GET  /                    - Dashboard");
    info!("  GET  /json                - Request details as JSON");
    info!("  GET  /ip                  - Client IP");
    info!("  GET  /user-agent          - User agent");
    info!("  GET  /headers             - Request headers as JSON");
    info!("  ANY  /status/:code        - Respond with status code");
    info!("  ANY  /delay/:ms           - Respond after a delay");
    info!("  GET  /health              - Health check");

    server.run().await?;

    Ok(())
}
