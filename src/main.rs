use anyhow::Result;
use std::sync::Arc;

use dexscanner_bot::api::DexClient;
use dexscanner_bot::core::{self, Config};
use dexscanner_bot::monitor::PairMonitor;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    core::logging::init_logging(&config.logging.log_level);

    tracing::info!("🚀 DexScanner bot starting...");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Endpoint: {}", config.dex.base_url);

    let client = Arc::new(DexClient::new(&config.dex)?);
    let mut monitor = PairMonitor::new(client, &config.monitor);

    // Runs until the process is killed.
    monitor.run().await;

    Ok(())
}
