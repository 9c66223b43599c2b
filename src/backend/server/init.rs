/**
 * Server Initialization
 *
 * Builds the application router from a configuration.
 *
 * # Initialization Process
 *
 * 1. Select the entity store (`load_store`)
 * 2. Wrap store and config in `AppState`
 * 3. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::{AppState, SharedStore};
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: the in-memory store is used
/// - Migration failures: logged but don't prevent startup
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing entity manager backend");
    let store = load_store(&config).await;
    create_app_with_store(store, config)
}

/// Build the router over an existing store
///
/// Used by tests to drive the full HTTP stack against a `MemoryStore`.
pub fn create_app_with_store(store: SharedStore, config: AppConfig) -> Router<()> {
    let app_state = AppState::new(store, config);
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
