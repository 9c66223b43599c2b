//! Tree Mutation Operations
//!
//! Create, read, update and delete for collections and items. Every path
//! that changes placement goes through the ledger: create persists the node
//! and then attaches it, delete detaches each node before removing its
//! document.

use futures_util::future::{join_all, BoxFuture};
use uuid::Uuid;

use super::ledger::{self, LedgerError};
use crate::backend::error::types::STORE_FAILURE_MESSAGE;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::store::EntityStore;
use crate::shared::requests::{CreatedNode, DeletedNodes, Linkage};
use crate::shared::{
    Collection, ExpandedCollection, Location, MissingReason, Node, NodeDraft, NodeKind, NodePatch,
    NodeRef, ResolvedChild,
};

/// Persist a new node owned by `owner_id`, then list it under its parent
/// or at the owner's root
///
/// A failed attach does not undo the create. The node is returned with an
/// `unlinked` status instead.
pub async fn create_node(
    store: &dyn EntityStore,
    draft: NodeDraft,
    parent_id: Option<Uuid>,
    owner_id: Uuid,
) -> BackendResult<CreatedNode> {
    let node = Node::create(draft, parent_id, owner_id);
    store.insert_node(&node).await?;
    tracing::info!("{} created: {} (owner {})", node.kind(), node.id(), owner_id);

    let destination = node.location();
    let linkage = match ledger::attach(store, node.node_ref(), destination).await {
        Ok(()) => Linkage::Linked,
        Err(LedgerError::DestinationNotFound(location)) => {
            tracing::warn!("{} {} created but not linked: {} does not exist", node.kind(), node.id(), location);
            Linkage::Unlinked {
                reason: unlinked_reason(location),
            }
        }
        Err(LedgerError::Store(e)) => {
            tracing::warn!("{} {} created but not linked: {:?}", node.kind(), node.id(), e);
            Linkage::Unlinked {
                reason: STORE_FAILURE_MESSAGE.to_string(),
            }
        }
    };

    Ok(CreatedNode { node, linkage })
}

fn unlinked_reason(location: Location) -> String {
    match location {
        Location::Root(user) => format!("Owner {} does not exist", user),
        Location::ChildOf(parent) => format!("Parent collection {} does not exist", parent),
    }
}

pub async fn get_node(store: &dyn EntityStore, kind: NodeKind, id: Uuid) -> BackendResult<Node> {
    store
        .get_node(kind, id)
        .await?
        .ok_or_else(|| BackendError::not_found(kind, id))
}

/// Nodes of `kind` owned by `owner_id`, oldest first
pub async fn list_nodes(store: &dyn EntityStore, kind: NodeKind, owner_id: Uuid) -> BackendResult<Vec<Node>> {
    Ok(store.list_nodes(kind, owner_id).await?)
}

async fn load_collection(store: &dyn EntityStore, id: Uuid) -> BackendResult<Collection> {
    match store.get_node(NodeKind::Collection, id).await? {
        Some(Node::Collection(collection)) => Ok(collection),
        _ => Err(BackendError::not_found(NodeKind::Collection, id)),
    }
}

/// Look up every entry concurrently, keeping list order
///
/// Entries whose target is gone, or whose lookup failed, become missing
/// markers instead of failing the whole list.
pub async fn resolve_children(store: &dyn EntityStore, entries: &[NodeRef]) -> Vec<ResolvedChild> {
    let lookups = entries.iter().map(|entry| async move {
        match store.get_node(entry.kind, entry.id).await {
            Ok(Some(node)) => ResolvedChild::Present(node),
            Ok(None) => {
                tracing::warn!("Dangling reference to {} {}", entry.kind, entry.id);
                ResolvedChild::missing(*entry, MissingReason::Deleted)
            }
            Err(e) => {
                tracing::error!("Failed to resolve {} {}: {:?}", entry.kind, entry.id, e);
                ResolvedChild::missing(*entry, MissingReason::Unavailable)
            }
        }
    });
    join_all(lookups).await
}

/// A collection with its children resolved to full records
pub async fn get_collection_expanded(store: &dyn EntityStore, id: Uuid) -> BackendResult<ExpandedCollection> {
    let collection = load_collection(store, id).await?;
    let children = resolve_children(store, &collection.children).await;
    Ok(ExpandedCollection::from_parts(collection, children))
}

/// The resolved children of a collection, without the collection itself
pub async fn get_collection_children(store: &dyn EntityStore, id: Uuid) -> BackendResult<Vec<ResolvedChild>> {
    let collection = load_collection(store, id).await?;
    Ok(resolve_children(store, &collection.children).await)
}

fn ensure_owner(node: &Node, actor: Uuid, action: &str) -> BackendResult<()> {
    if node.owner_id() != actor {
        tracing::warn!("User {} may not {} {} {}", actor, action, node.kind(), node.id());
        return Err(BackendError::forbidden(format!(
            "Only the owner may {} this {}",
            action,
            node.kind().as_str().to_lowercase()
        )));
    }
    Ok(())
}

/// Merge `patch` over the stored attributes; owner only
pub async fn update_node(
    store: &dyn EntityStore,
    kind: NodeKind,
    id: Uuid,
    patch: NodePatch,
    actor: Uuid,
) -> BackendResult<Node> {
    let mut node = get_node(store, kind, id).await?;
    ensure_owner(&node, actor, "update")?;

    node.apply(patch, actor);
    let stored = store
        .update_node(&node)
        .await?
        .ok_or_else(|| BackendError::not_found(kind, id))?;

    tracing::info!("{} updated: {} by {}", kind, id, actor);
    Ok(stored)
}

/// Delete a node; owner only
///
/// Collections take their whole subtree with them, deepest first. Each node
/// is detached from its list before its document goes, so no list ever
/// points at a node this call has already removed. Children attached while
/// the cascade runs are picked up by re-reading the list.
pub async fn delete_node(store: &dyn EntityStore, kind: NodeKind, id: Uuid, actor: Uuid) -> BackendResult<DeletedNodes> {
    let node = get_node(store, kind, id).await?;
    ensure_owner(&node, actor, "delete")?;

    let mut removed = Vec::new();
    delete_subtree(store, &node, &mut removed).await?;

    tracing::info!("{} deleted: {} by {} ({} nodes removed)", kind, id, actor, removed.len());
    Ok(DeletedNodes {
        message: format!("{} {} deleted", kind, id),
        removed,
    })
}

fn delete_subtree<'a>(
    store: &'a dyn EntityStore,
    node: &'a Node,
    removed: &'a mut Vec<NodeRef>,
) -> BoxFuture<'a, BackendResult<()>> {
    Box::pin(async move {
        if let Node::Collection(collection) = node {
            let listing = Location::ChildOf(collection.id);
            let mut entries = collection.children.clone();
            // Repeat until a re-read finds nothing attached behind us
            while !entries.is_empty() {
                for entry in &entries {
                    if let Some(child) = store.get_node(entry.kind, entry.id).await? {
                        delete_subtree(store, &child, removed).await?;
                    }
                    ledger::detach(store, *entry, listing).await?;
                }
                entries = match store.get_node(NodeKind::Collection, collection.id).await? {
                    Some(Node::Collection(current)) => current.children,
                    _ => Vec::new(),
                };
            }
        }

        ledger::detach(store, node.node_ref(), node.location()).await?;
        store.delete_node(node.node_ref()).await?;
        removed.push(node.node_ref());
        Ok(())
    })
}
