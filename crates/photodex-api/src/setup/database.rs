//! Database setup and initialization

use anyhow::{Context, Result};
use photodex_core::Config;
use photodex_db::MIGRATOR;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::time::Duration;

/// Each connection to `sqlite::memory:` opens its own empty database.
fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<SqlitePool> {
    tracing::info!("Connecting to database...");

    let url = config.database_url();
    let options = if is_in_memory(url) {
        tracing::warn!("In-memory database: data is lost on shutdown, pool limited to 1 connection");
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.db_max_connections())
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
    };

    let pool = options
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .connect(url)
        .await
        .with_context(|| format!("Failed to connect to database at {}", url))?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        "Database connected successfully"
    );

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
