/**
 * Server Configuration
 *
 * Selects the entity store at startup.
 *
 * # Error Handling
 *
 * Database problems are logged but do not prevent server startup. Without
 * `DATABASE_URL`, or when the connection fails, the server runs on the
 * in-memory store.
 */

use std::sync::Arc;

use sqlx::PgPool;

use crate::backend::server::state::SharedStore;
use crate::backend::store::{MemoryStore, PgStore};
use crate::shared::AppConfig;

/// Connect to PostgreSQL and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is reachable
/// - `None` if `database_url` is unset or the connection fails
pub async fn load_database(config: &AppConfig) -> Option<PgPool> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Entities will be kept in memory.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to the in-memory store.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// The store the server should use for this configuration
pub async fn load_store(config: &AppConfig) -> SharedStore {
    match load_database(config).await {
        Some(pool) => {
            tracing::info!("Using PostgreSQL entity store");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::info!("Using in-memory entity store");
            Arc::new(MemoryStore::new())
        }
    }
}
