/**
 * Application State Management
 *
 * This module defines the application state every handler extracts
 * with `State<AppState>`.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - the entity store, behind `Arc<dyn EntityStore>` so the PostgreSQL and
 *   in-memory stores are interchangeable
 * - the loaded `AppConfig` (token secret and lifetime, bcrypt cost)
 *
 * # Example
 *
 * ```rust,no_run
 * use entity_manager::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let users = state.store.list_users().await;
 * }
 * ```
 */

use std::sync::Arc;

use crate::backend::store::EntityStore;
use crate::shared::AppConfig;

/// Shared store handle
pub type SharedStore = Arc<dyn EntityStore>;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Users, collections and items
    pub store: SharedStore,

    /// Settings loaded at startup
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: SharedStore, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
