//! Backend Module
//!
//! All server-side code: the entity store, the tree and account operations,
//! and the axum HTTP layer on top of them.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`store`** - `EntityStore` trait with PostgreSQL and in-memory backends
//! - **`tree`** - membership ledger, node operations, sharing
//! - **`auth`** - accounts, JWT sessions, account handlers
//! - **`middleware`** - bearer-token authentication
//! - **`routes`** - route wiring under `/api/v1`
//! - **`server`** - state, store selection, router construction
//! - **`error`** - `BackendError` and its JSON response
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs        - Module exports and documentation
//! ├── main.rs       - Server binary
//! ├── store/        - Entity storage
//! ├── tree/         - Collections and items
//! ├── auth/         - Accounts and tokens
//! ├── middleware/   - Request middleware
//! ├── routes/       - Route configuration
//! ├── server/       - Initialization and state
//! └── error/        - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` carries an `Arc<dyn EntityStore>` and the `AppConfig`. The
//! store is the only shared mutable state; every list mutation goes through
//! its atomic append/remove primitives.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. Errors carry a stable outcome
//! code and are rendered as `{ outcome, message, status }`.

/// Entity storage
pub mod store;

/// Collections, items and their membership lists
pub mod tree;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::create_app;
pub use store::{EntityStore, MemoryStore, PgStore};
