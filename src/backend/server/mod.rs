//! Server Module
//!
//! Server initialization, application state and store selection.
//!
//! # Architecture
//!
//! - **`state`** - `AppState`, the store and config shared by handlers
//! - **`config`** - database connection and store fallback
//! - **`init`** - router construction

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{create_app, create_app_with_store};
pub use state::{AppState, SharedStore};
