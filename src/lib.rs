//! Entity Manager - Main Library
//!
//! A REST backend for a per-user forest of Collections and Items. A
//! Collection holds an ordered list of child references; an Item is a leaf.
//! Every node is listed in exactly one place: its parent's `children`, or
//! its owner's `mainCollection` when it has no parent.
//!
//! # Module Structure
//!
//! - **`shared`** - Plain data: entities, request/response payloads,
//!   outcome codes, validation errors, configuration
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Entity store (PostgreSQL or in-memory)
//!   - Membership ledger, tree operations, sharing
//!   - Accounts and JWT authentication
//!   - Axum routes under `/api/v1`
//!
//! # Feature Flags
//!
//! - **`ssr`** - enables the backend (on by default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use entity_manager::backend::server::init::create_app;
//! use entity_manager::shared::AppConfig;
//!
//! # async fn example() {
//! let config = AppConfig::from_env().expect("valid configuration");
//! let app = create_app(config).await;
//! // Serve with axum::serve
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for input validation
//! - `backend::store::StoreError` for storage failures
//! - `backend::BackendError` for everything a handler can return

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
