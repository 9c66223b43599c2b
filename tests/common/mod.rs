//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - An in-process app over the in-memory store
//! - Authentication test helpers
//! - Custom assertion macros

pub mod assertions;
pub mod auth_helpers;
pub mod server;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use server::*;
