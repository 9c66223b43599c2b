//! In-memory entity store
//!
//! Holds every table behind a single `tokio::sync::RwLock`. Each trait
//! method takes the lock once, so every primitive is atomic with respect to
//! every other. Used when no database is configured and throughout the
//! tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EntityStore, MemberAppend, MemberRemoval, ShareAppend, StoreError, StoreResult};
use crate::shared::entities::{Collection, Item, Location, Node, NodeKind, NodeRef, Share, User};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    collections: HashMap<Uuid, Collection>,
    items: HashMap<Uuid, Item>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn list_mut(&mut self, location: Location) -> Option<&mut Vec<NodeRef>> {
        match location {
            Location::Root(user_id) => self.users.get_mut(&user_id).map(|u| &mut u.main_collection),
            Location::ChildOf(collection_id) => self
                .collections
                .get_mut(&collection_id)
                .map(|c| &mut c.children),
        }
    }
}

/// Entity store backed by in-process hash maps
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(StoreError::Duplicate {
                field: "email".to_string(),
                value: user.email.clone(),
            });
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn update_user(&self, user: &User) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, Some(user.id)) {
            return Err(StoreError::Duplicate {
                field: "email".to_string(),
                value: user.email.clone(),
            });
        }
        let Some(stored) = tables.users.get_mut(&user.id) else {
            return Ok(None);
        };
        stored.name = user.name.clone();
        stored.email = user.email.clone();
        stored.mobile = user.mobile.clone();
        stored.image = user.image.clone();
        stored.password_hash = user.password_hash.clone();
        stored.modified_at = user.modified_at;
        Ok(Some(stored.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.tables.write().await.users.remove(&id).is_some())
    }

    async fn insert_node(&self, node: &Node) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        match node {
            Node::Collection(c) => {
                tables.collections.insert(c.id, c.clone());
            }
            Node::Item(i) => {
                tables.items.insert(i.id, i.clone());
            }
        }
        Ok(())
    }

    async fn get_node(&self, kind: NodeKind, id: Uuid) -> StoreResult<Option<Node>> {
        let tables = self.tables.read().await;
        Ok(match kind {
            NodeKind::Collection => tables.collections.get(&id).cloned().map(Node::Collection),
            NodeKind::Item => tables.items.get(&id).cloned().map(Node::Item),
        })
    }

    async fn list_nodes(&self, kind: NodeKind, owner_id: Uuid) -> StoreResult<Vec<Node>> {
        let tables = self.tables.read().await;
        let mut nodes: Vec<Node> = match kind {
            NodeKind::Collection => tables
                .collections
                .values()
                .filter(|c| c.owner_id == owner_id)
                .cloned()
                .map(Node::Collection)
                .collect(),
            NodeKind::Item => tables
                .items
                .values()
                .filter(|i| i.owner_id == owner_id)
                .cloned()
                .map(Node::Item)
                .collect(),
        };
        nodes.sort_by_key(|n| match n {
            Node::Collection(c) => c.created_at,
            Node::Item(i) => i.created_at,
        });
        Ok(nodes)
    }

    async fn update_node(&self, node: &Node) -> StoreResult<Option<Node>> {
        let mut tables = self.tables.write().await;
        match node {
            Node::Collection(c) => {
                let Some(stored) = tables.collections.get_mut(&c.id) else {
                    return Ok(None);
                };
                stored.name = c.name.clone();
                stored.description = c.description.clone();
                stored.image = c.image.clone();
                stored.modified_by = c.modified_by;
                stored.modified_at = c.modified_at;
                Ok(Some(Node::Collection(stored.clone())))
            }
            Node::Item(i) => {
                let Some(stored) = tables.items.get_mut(&i.id) else {
                    return Ok(None);
                };
                stored.name = i.name.clone();
                stored.item_type = i.item_type.clone();
                stored.description = i.description.clone();
                stored.image = i.image.clone();
                stored.modified_by = i.modified_by;
                stored.modified_at = i.modified_at;
                Ok(Some(Node::Item(stored.clone())))
            }
        }
    }

    async fn delete_node(&self, node: NodeRef) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match node.kind {
            NodeKind::Collection => tables.collections.remove(&node.id).is_some(),
            NodeKind::Item => tables.items.remove(&node.id).is_some(),
        })
    }

    async fn append_member(&self, location: Location, node: NodeRef) -> StoreResult<MemberAppend> {
        let mut tables = self.tables.write().await;
        let Some(list) = tables.list_mut(location) else {
            return Ok(MemberAppend::ListMissing);
        };
        if list.iter().any(|entry| entry.id == node.id) {
            return Ok(MemberAppend::AlreadyPresent);
        }
        list.push(node);
        Ok(MemberAppend::Appended)
    }

    async fn remove_member(&self, location: Location, node_id: Uuid) -> StoreResult<MemberRemoval> {
        let mut tables = self.tables.write().await;
        let Some(list) = tables.list_mut(location) else {
            return Ok(MemberRemoval::ListMissing);
        };
        let before = list.len();
        list.retain(|entry| entry.id != node_id);
        if list.len() == before {
            Ok(MemberRemoval::NotPresent)
        } else {
            Ok(MemberRemoval::Removed)
        }
    }

    async fn append_share(&self, collection_id: Uuid, share: &Share) -> StoreResult<ShareAppend> {
        let mut tables = self.tables.write().await;
        let Some(collection) = tables.collections.get_mut(&collection_id) else {
            return Ok(ShareAppend::CollectionMissing);
        };
        if collection
            .shared_with
            .iter()
            .any(|s| s.to_user_id == share.to_user_id)
        {
            return Ok(ShareAppend::AlreadyShared);
        }
        collection.shared_with.push(share.clone());
        Ok(ShareAppend::Appended)
    }
}
