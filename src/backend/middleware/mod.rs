//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! - **`auth`** - bearer-token authentication for the protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, Router};
//! use entity_manager::backend::middleware::auth_middleware;
//! use entity_manager::backend::server::state::AppState;
//!
//! fn protect(router: Router<AppState>, state: AppState) -> Router<AppState> {
//!     router.route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
