//! merit market-integrity service entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Reputation token market-integrity service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via MERIT_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    merit_telemetry::init_logging()?;

    info!("Starting merit v{}", env!("CARGO_PKG_VERSION"));

    let config = match args.config {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            merit_server::AppConfig::from_file(&path)?
        }
        None => merit_server::AppConfig::load()?,
    };
    info!(
        host = %config.server.host,
        port = config.server.port,
        required_confirmations = config.consensus.required_confirmations,
        "Configuration loaded"
    );

    let app = merit_server::Application::new(config)?;
    app.run().await?;

    Ok(())
}
