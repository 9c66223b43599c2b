//! Backend Error Module
//!
//! Error types returned by handlers and the tree operations, and their
//! conversion into JSON responses.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError`, its outcome codes and HTTP statuses
//! - **`conversion`** - `IntoResponse` and the failure envelope
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::ErrorBody;
pub use types::BackendError;

/// Result alias used by handlers and services
pub type BackendResult<T> = Result<T, BackendError>;
