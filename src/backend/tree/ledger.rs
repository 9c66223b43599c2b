//! Membership Ledger
//!
//! The only code that changes `main_collection` and `children`. A node is
//! listed in exactly one place: its parent collection's children, or its
//! owner's roots when it has no parent.

use thiserror::Error;

use crate::backend::store::{EntityStore, MemberAppend, MemberRemoval, StoreError};
use crate::shared::{Location, NodeRef};

/// Why `attach` could not list a node
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("destination not found: {0}")]
    DestinationNotFound(Location),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What `detach` found at the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detachment {
    Removed,
    /// Entry or origin already gone; nothing to do
    AlreadyDetached,
}

/// List `node` at `destination`
///
/// Re-attaching a listed node changes nothing.
pub async fn attach(
    store: &dyn EntityStore,
    node: NodeRef,
    destination: Location,
) -> Result<(), LedgerError> {
    match store.append_member(destination, node).await? {
        MemberAppend::Appended => {
            tracing::debug!("Attached {} {} to {}", node.kind, node.id, destination);
            Ok(())
        }
        MemberAppend::AlreadyPresent => {
            tracing::debug!("{} {} already listed in {}", node.kind, node.id, destination);
            Ok(())
        }
        MemberAppend::ListMissing => Err(LedgerError::DestinationNotFound(destination)),
    }
}

/// Remove `node` from `origin`, matching by id
pub async fn detach(
    store: &dyn EntityStore,
    node: NodeRef,
    origin: Location,
) -> Result<Detachment, StoreError> {
    match store.remove_member(origin, node.id).await? {
        MemberRemoval::Removed => Ok(Detachment::Removed),
        MemberRemoval::NotPresent => Ok(Detachment::AlreadyDetached),
        MemberRemoval::ListMissing => {
            tracing::warn!("Detach of {} {}: {} no longer exists", node.kind, node.id, origin);
            Ok(Detachment::AlreadyDetached)
        }
    }
}
