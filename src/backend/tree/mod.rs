//! Tree Module
//!
//! Collections and items arranged as a forest per user.
//!
//! # Architecture
//!
//! - **`ledger`** - attach/detach, the only writers of membership lists
//! - **`nodes`** - create, read, update and cascading delete
//! - **`sharing`** - outbound visibility grants on collections
//! - **`handlers`** - axum handlers for `/collections` and `/items`
//!
//! # Consistency
//!
//! No transaction spans a node document and the list that references it.
//! Create writes the node first and attaches second; a failed attach is
//! reported as `unlinked` on the response. Delete detaches first and
//! removes the document second, so a retried delete finds nothing to
//! detach. Readers tolerate the gap: a list entry whose node is gone
//! resolves to a missing marker.

/// Membership ledger
pub mod ledger;

/// Node operations
pub mod nodes;

/// Sharing ledger
pub mod sharing;

/// HTTP handlers
pub mod handlers;

pub use ledger::{attach, detach, Detachment, LedgerError};
pub use sharing::share_collection;
