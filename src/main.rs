//! Flipopay payout gateway.
//!
//! Main entry point for the gateway server. Loads configuration, builds
//! the upstream forwarder client, and serves the HTTP API until shutdown.

use anyhow::{Context, Result};
use flipopay_api::{start_server, AppState, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting Flipopay payout gateway");

    // Load configuration from defaults, config.toml, and environment
    let config = Config::load()?;
    info!(
        host = %config.host,
        port = config.port,
        upstream_url = %config.upstream_url,
        secret_key = %config.secret_key_masked(),
        "Configuration loaded"
    );

    let addr = config.parse_server_addr()?;
    let state = AppState::new(config).context("Failed to build upstream forwarder client")?;

    start_server(state, addr).await.context("Server failed")?;

    info!("Flipopay gateway shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,flipopay=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
