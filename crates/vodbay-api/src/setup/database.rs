//! Database setup and initialization

use anyhow::Result;
use sqlx::SqlitePool;
use vodbay_core::Config;

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<SqlitePool> {
    tracing::info!("Connecting to database...");
    let pool = vodbay_db::connect(&config.database_url, config.db_max_connections).await?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connected successfully"
    );

    // Run pending migrations on startup
    vodbay_db::migrate(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
