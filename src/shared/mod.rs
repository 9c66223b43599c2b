//! Shared Module
//!
//! Types shared between the store, the tree operations and the HTTP layer.
//! Nothing in here touches the network or the database; everything is plain
//! data plus validation.
//!
//! # Overview
//!
//! - **`entities`** - User, Collection, Item, node references and locations
//! - **`requests`** - request bodies and response payloads
//! - **`outcome`** - stable outcome codes and the success envelope
//! - **`error`** - input validation errors
//! - **`config`** - application configuration

/// Entity records and references
pub mod entities;

/// Request and response payloads
pub mod requests;

/// Outcome codes and response envelope
pub mod outcome;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use entities::{
    Collection, ExpandedCollection, Item, Location, MissingReason, Node, NodeDraft, NodeKind,
    NodePatch, NodeRef, ResolvedChild, Share, User, UserProfile,
};
pub use error::SharedError;
pub use outcome::{ApiResponse, Outcome};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
