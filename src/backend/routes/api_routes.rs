/**
 * API Routes
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/v1/users` - Register
 * - `POST /api/v1/users/login` - Login
 *
 * ## Authenticated (`Authorization: Bearer <token>`)
 * - `GET /api/v1/users/listing`
 * - `GET|PUT|DELETE /api/v1/users/{id}`
 * - `GET /api/v1/users/{id}/collection`
 * - `POST|GET /api/v1/collections`
 * - `GET|PUT|DELETE /api/v1/collections/{id}`
 * - `GET /api/v1/collections/{id}/children` (also `/collections/{id}/item`)
 * - `POST /api/v1/collections/{id}/share`
 * - `POST|GET /api/v1/items`
 * - `GET|PUT|DELETE /api/v1/items/{id}`
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers as accounts;
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::tree::handlers as tree;

/// Prefix shared by every API route
pub const API_PREFIX: &str = "/api/v1";

/// Routes that need no token
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(accounts::register))
        .route("/users/login", post(accounts::login))
}

/// Routes behind `auth_middleware`
fn protected_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users/listing", get(accounts::list_users))
        .route(
            "/users/{id}",
            get(accounts::get_user)
                .put(accounts::update_user)
                .delete(accounts::delete_user),
        )
        .route("/users/{id}/collection", get(accounts::get_user_roots))
        .route(
            "/collections",
            post(tree::create_collection).get(tree::list_collections),
        )
        .route(
            "/collections/{id}",
            get(tree::get_collection)
                .put(tree::update_collection)
                .delete(tree::delete_collection),
        )
        .route("/collections/{id}/children", get(tree::get_collection_children))
        .route("/collections/{id}/item", get(tree::get_collection_children))
        .route("/collections/{id}/share", post(tree::share_collection))
        .route("/items", post(tree::create_item).get(tree::list_items))
        .route(
            "/items/{id}",
            get(tree::get_item)
                .put(tree::update_item)
                .delete(tree::delete_item),
        )
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware))
}

/// Configure API routes
///
/// Nests the public and authenticated routes under [`API_PREFIX`].
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    router.nest(
        API_PREFIX,
        public_routes().merge(protected_routes(app_state)),
    )
}
