/**
 * Router Configuration
 *
 * Combines the API routes with tracing, CORS and a JSON 404 fallback.
 */

use axum::{http::Uri, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Layers
///
/// - `TraceLayer` logs every request and response through `tracing`
/// - `CorsLayer` allows any origin, method and header
///
/// # Fallback
///
/// Unknown paths return the standard `NotFound` error body.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), app_state.clone());

    let router = router.fallback(|uri: Uri| async move {
        BackendError::NotFound {
            message: format!("No route for {}", uri.path()),
        }
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
