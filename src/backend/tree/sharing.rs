//! Sharing Ledger
//!
//! Grants another user visibility of a collection. There is no unshare.

use chrono::Utc;
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::store::{EntityStore, ShareAppend};
use crate::shared::{Collection, Node, NodeKind, Share};

/// Record that `from_user_id` shared a collection with `to_user_id`
///
/// Checked in order: the collection exists, the target user exists, the
/// caller owns the collection, the target is not already listed.
pub async fn share_collection(
    store: &dyn EntityStore,
    collection_id: Uuid,
    from_user_id: Uuid,
    to_user_id: Uuid,
) -> BackendResult<Collection> {
    let collection = match store.get_node(NodeKind::Collection, collection_id).await? {
        Some(Node::Collection(collection)) => collection,
        _ => return Err(BackendError::not_found(NodeKind::Collection, collection_id)),
    };

    if store.get_user(to_user_id).await?.is_none() {
        return Err(BackendError::user_not_found(to_user_id));
    }

    if collection.owner_id != from_user_id {
        tracing::warn!("User {} may not share collection {}", from_user_id, collection_id);
        return Err(BackendError::forbidden("Only the owner may share this collection"));
    }

    let already_shared = BackendError::AlreadyShared {
        collection_id,
        user_id: to_user_id,
    };
    if collection.shared_with.iter().any(|s| s.to_user_id == to_user_id) {
        return Err(already_shared);
    }

    let share = Share {
        to_user_id,
        from_user_id,
        shared_at: Utc::now(),
    };
    match store.append_share(collection_id, &share).await? {
        ShareAppend::Appended => {}
        // Lost a race with an identical share
        ShareAppend::AlreadyShared => return Err(already_shared),
        ShareAppend::CollectionMissing => {
            return Err(BackendError::not_found(NodeKind::Collection, collection_id))
        }
    }

    tracing::info!("Collection {} shared with {} by {}", collection_id, to_user_id, from_user_id);

    match store.get_node(NodeKind::Collection, collection_id).await? {
        Some(Node::Collection(updated)) => Ok(updated),
        _ => Err(BackendError::not_found(NodeKind::Collection, collection_id)),
    }
}
