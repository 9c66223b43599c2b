//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, layers and fallback
//! - **`api_routes`** - The `/api/v1` endpoints, public and authenticated
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports and documentation
//! ├── router.rs     - Main router creation
//! └── api_routes.rs - API endpoint wiring
//! ```

use uuid::Uuid;

use crate::shared::SharedError;

/// Main router creation
pub mod router;

/// API endpoint wiring
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;

/// Parse an id path segment
///
/// Taken as a string so a malformed id is an `Invalid` outcome rather than
/// axum's plain-text path rejection.
pub fn parse_id(raw: &str) -> Result<Uuid, SharedError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| SharedError::validation("id", format!("'{}' is not a valid id", raw)))
}
