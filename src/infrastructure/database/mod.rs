//! Database Module
//!
//! PostgreSQL connection pool, migrations and the liveness probe.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::warn;

use crate::config::DatabaseSettings;

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Is-alive probe for the document store.
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    async fn is_alive(&self) -> bool;
}

#[async_trait]
impl DatabaseHealth for PgPool {
    async fn is_alive(&self) -> bool {
        match sqlx::query("SELECT 1").execute(self).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Database ping failed");
                false
            }
        }
    }
}
