//! Entity Store
//!
//! Durable per-document storage for users, collections and items.
//!
//! # Contract
//!
//! Every method is atomic for the single document it touches. Membership
//! lists (`main_collection`, `children`) and share lists (`shared_with`) are
//! only ever changed through the dedicated append/remove primitives, which
//! are atomic read-modify-write operations on that one field. Whole-record
//! writes (`update_user`, `update_node`) leave those fields untouched, so a
//! concurrent attribute update can never drop a list entry.
//!
//! # Implementations
//!
//! - [`memory::MemoryStore`] - in-process maps behind one `RwLock`
//! - [`postgres::PgStore`] - PostgreSQL tables with JSONB list columns

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::entities::{Location, Node, NodeKind, NodeRef, Share, User};

/// In-memory store
pub mod memory;

/// PostgreSQL store
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors raised by a store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique field already holds this value
    #[error("duplicate value for {field}: {value}")]
    Duplicate { field: String, value: String },

    /// The storage engine failed
    #[error("storage backend error: {0}")]
    Backend(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of appending to a membership list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAppend {
    Appended,
    /// An entry with the same id was already listed; nothing changed
    AlreadyPresent,
    /// The user or collection holding the list does not exist
    ListMissing,
}

/// Result of removing from a membership list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRemoval {
    Removed,
    NotPresent,
    ListMissing,
}

/// Result of appending a share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareAppend {
    Appended,
    AlreadyShared,
    CollectionMissing,
}

/// Storage interface for users, collections and items
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Insert a new user; fails with `Duplicate` on a taken email
    async fn insert_user(&self, user: &User) -> StoreResult<()>;
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    /// Overwrite the attribute fields of a user. Returns the stored record,
    /// or `None` if the user does not exist.
    async fn update_user(&self, user: &User) -> StoreResult<Option<User>>;
    async fn delete_user(&self, id: Uuid) -> StoreResult<bool>;

    async fn insert_node(&self, node: &Node) -> StoreResult<()>;
    async fn get_node(&self, kind: NodeKind, id: Uuid) -> StoreResult<Option<Node>>;
    /// Nodes of `kind` owned by `owner_id`, oldest first
    async fn list_nodes(&self, kind: NodeKind, owner_id: Uuid) -> StoreResult<Vec<Node>>;
    /// Overwrite the attribute fields of a node. Returns the stored record,
    /// or `None` if the node does not exist.
    async fn update_node(&self, node: &Node) -> StoreResult<Option<Node>>;
    async fn delete_node(&self, node: NodeRef) -> StoreResult<bool>;

    /// Append `node` to the list at `location` unless its id is already there
    async fn append_member(&self, location: Location, node: NodeRef) -> StoreResult<MemberAppend>;
    /// Remove every entry with `node_id` from the list at `location`
    async fn remove_member(&self, location: Location, node_id: Uuid) -> StoreResult<MemberRemoval>;

    /// Append `share` unless the collection is already shared with its target
    async fn append_share(&self, collection_id: Uuid, share: &Share) -> StoreResult<ShareAppend>;
}
