use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::app::{app, AppState};
use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let store = DatabaseManager::connect(&config.database).await?;
    let bind_addr = config.bind_addr();
    let state = AppState::new(config, store)?;

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Bookmarks API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Bookmarks API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
