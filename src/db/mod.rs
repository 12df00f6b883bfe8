pub mod models;

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info};

use crate::{config::Config, store::ReadingStore};

pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Open the process-wide store handle.
///
/// A failed connection leaves the service running without a store unless
/// `store_required` is set; there is no reconnection attempt afterwards.
pub async fn connect(config: &Config) -> Result<ReadingStore> {
    let attempt = async {
        let url = config
            .database_url
            .as_deref()
            .context("missing env var: DATABASE_URL")?;
        let pool = create_pool(url).await?;
        run_migrations(&pool).await?;
        anyhow::Ok(pool)
    };

    match attempt.await {
        Ok(pool) => {
            info!("Database ready");
            Ok(ReadingStore::postgres(pool))
        }
        Err(e) if config.store_required => Err(e.context("failed to connect to the database")),
        Err(e) => {
            error!(error = %e, "Failed to connect to the database; serving in degraded mode");
            Ok(ReadingStore::unavailable())
        }
    }
}
