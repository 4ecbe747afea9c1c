//! Pump.fun token launcher and trade relay - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Pump.fun token launcher and trade relay
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PUMPLINE_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // TLS crypto provider must be installed before any WS connections
    pumpline_ws::init_crypto();

    let args = Args::parse();

    pumpline_bot::init_logging();

    info!("Starting pumpline v{}", env!("CARGO_PKG_VERSION"));

    let config = match args.config {
        Some(path) => pumpline_bot::AppConfig::from_file(&path)?,
        None => pumpline_bot::AppConfig::load()?,
    };
    info!(ws_url = %config.ws_url, server_enabled = config.server.enabled, "Configuration loaded");

    let app = pumpline_bot::Application::new(config)?;
    app.run().await?;

    Ok(())
}
