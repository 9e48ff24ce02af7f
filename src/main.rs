//! Company search API server

use anyhow::Context;
use market_info::config::ServerConfig;
use market_info::server::ApiServer;
use market_info::state::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    market_info::init_tracing();

    tracing::info!("Starting Market Info API...");

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    let state = Arc::new(AppState::new(&config));

    let mut server = ApiServer::new(state);
    server
        .start(&config)
        .await
        .with_context(|| format!("Failed to start server on {}:{}", config.host, config.port))?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    server.stop();
    tracing::info!("Market Info API stopped");
    Ok(())
}
