use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

pub mod memory;
pub mod queries;
pub mod store;

pub use memory::MemoryAlertStore;
pub use store::{AlertStore, PgAlertStore};

pub type DbPool = Pool<Postgres>;

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Creates the alert table and its natural-key constraint if missing.
pub async fn ensure_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(queries::CREATE_ALERTS_TABLE)
        .execute(pool)
        .await?;
    sqlx::query(queries::CREATE_ISSUE_TIME_INDEX)
        .execute(pool)
        .await?;
    info!("Schema ready (space_weather_alerts)");
    Ok(())
}
