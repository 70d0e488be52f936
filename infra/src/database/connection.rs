//! Database connection pool management

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use da_shared::DatabaseConfig;

/// Create a MySQL connection pool from the shared database configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    tracing::info!(
        max_connections = config.max_connections,
        "Creating database connection pool"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .max_lifetime(Duration::from_secs(config.max_lifetime))
        .test_before_acquire(true)
        .connect(&config.url)
        .await?;

    tracing::info!("Database connection pool created");
    Ok(pool)
}
