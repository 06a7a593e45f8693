use anyhow::Context;
use tracing::info;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let url = config
        .database
        .url
        .as_deref()
        .context("DATABASE_URL must be set to run migrations")?;

    let pool = DatabaseManager::pool(url, &config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    pool.close().await;

    info!("Migrations complete");
    Ok(())
}
