//! Entity Data Structures
//!
//! The three record kinds the store holds (User, Collection, Item) and the
//! typed references that link them.
//!
//! # Membership
//!
//! Every Collection or Item is listed in exactly one membership list:
//! its parent Collection's `children` when `parent_id` is set, otherwise its
//! owner's `main_collection`. [`Location`] names such a list and
//! [`NodeRef`] is the entry stored in it.
//!
//! # Wire Format
//!
//! All records serialize with camelCase field names. A [`Node`] carries a
//! `kind` tag so mixed child lists can be rendered without a second lookup.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Parent values clients send to mean "no parent"
const NO_PARENT_SENTINELS: [&str; 3] = ["", "0", "null"];

/// The two node kinds a membership list can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(alias = "collection")]
    Collection,
    #[serde(alias = "item")]
    Item,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Collection => "Collection",
            NodeKind::Item => "Item",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed pointer stored in a membership list
///
/// Carries no ownership. Removal from a list matches on `id` only; `kind`
/// routes retrieval to the right table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub id: Uuid,
    #[serde(alias = "type")]
    pub kind: NodeKind,
}

impl NodeRef {
    pub fn new(id: Uuid, kind: NodeKind) -> Self {
        Self { id, kind }
    }

    pub fn collection(id: Uuid) -> Self {
        Self::new(id, NodeKind::Collection)
    }

    pub fn item(id: Uuid) -> Self {
        Self::new(id, NodeKind::Item)
    }
}

/// A membership list: a user's roots or a collection's children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// `main_collection` of the user
    Root(Uuid),
    /// `children` of the collection
    ChildOf(Uuid),
}

impl Location {
    /// The list a node with this parent and owner belongs in
    pub fn for_parent(parent_id: Option<Uuid>, owner_id: Uuid) -> Self {
        match parent_id {
            Some(parent) => Location::ChildOf(parent),
            None => Location::Root(owner_id),
        }
    }

    /// Id of the record that holds the list
    pub fn holder_id(&self) -> Uuid {
        match self {
            Location::Root(id) | Location::ChildOf(id) => *id,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Root(user) => write!(f, "root of user {}", user),
            Location::ChildOf(collection) => write!(f, "children of collection {}", collection),
        }
    }
}

/// Normalize a client-supplied parent id
///
/// `None`, `""`, `"0"` and `"null"` all mean "no parent". Anything else
/// must be a UUID.
pub fn parse_parent_id(raw: Option<&str>) -> Result<Option<Uuid>, SharedError> {
    let Some(raw) = raw.map(str::trim) else {
        return Ok(None);
    };
    if NO_PARENT_SENTINELS.contains(&raw) {
        return Ok(None);
    }
    Uuid::parse_str(raw)
        .map(Some)
        .map_err(|_| SharedError::validation("parentId", format!("'{}' is not a valid id", raw)))
}

/// One outbound visibility grant on a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    pub to_user_id: Uuid,
    pub from_user_id: Uuid,
    pub shared_at: DateTime<Utc>,
}

/// Container node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: String,
    pub parent_id: Option<Uuid>,
    /// Display order is insertion order
    #[cfg_attr(feature = "ssr", sqlx(json))]
    pub children: Vec<NodeRef>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<Uuid>,
    pub modified_at: DateTime<Utc>,
    #[cfg_attr(feature = "ssr", sqlx(json))]
    pub shared_with: Vec<Share>,
}

/// Leaf node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    /// Free-form category
    #[serde(rename = "type")]
    pub item_type: String,
    pub description: Option<String>,
    pub image: String,
    pub parent_id: Option<Uuid>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<Uuid>,
    pub modified_at: DateTime<Utc>,
}

/// A registered account
///
/// `password_hash` never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub image: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[cfg_attr(feature = "ssr", sqlx(json))]
    pub main_collection: Vec<NodeRef>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: String,
        email: String,
        mobile: String,
        image: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            mobile,
            image,
            password_hash,
            main_collection: Vec::new(),
            created_at: now,
            modified_at: now,
        }
    }
}

/// Validated attributes for a node that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeDraft {
    Collection {
        name: String,
        description: Option<String>,
        image: String,
    },
    Item {
        name: String,
        item_type: String,
        description: Option<String>,
        image: String,
    },
}

/// Attribute changes accepted by an update
///
/// Identity and placement fields have no slot here, so they can never be
/// applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Ignored for collections
    pub item_type: Option<String>,
}

/// A Collection or an Item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Node {
    Collection(Collection),
    Item(Item),
}

impl Node {
    /// Build a fresh node owned by `owner_id` under `parent_id`
    pub fn create(draft: NodeDraft, parent_id: Option<Uuid>, owner_id: Uuid) -> Self {
        let now = Utc::now();
        let id = Uuid::new_v4();
        match draft {
            NodeDraft::Collection {
                name,
                description,
                image,
            } => Node::Collection(Collection {
                id,
                name,
                description,
                image,
                parent_id,
                children: Vec::new(),
                owner_id,
                created_at: now,
                modified_by: Some(owner_id),
                modified_at: now,
                shared_with: Vec::new(),
            }),
            NodeDraft::Item {
                name,
                item_type,
                description,
                image,
            } => Node::Item(Item {
                id,
                name,
                item_type,
                description,
                image,
                parent_id,
                owner_id,
                created_at: now,
                modified_by: Some(owner_id),
                modified_at: now,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Node::Collection(c) => c.id,
            Node::Item(i) => i.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Collection(_) => NodeKind::Collection,
            Node::Item(_) => NodeKind::Item,
        }
    }

    pub fn node_ref(&self) -> NodeRef {
        NodeRef::new(self.id(), self.kind())
    }

    pub fn parent_id(&self) -> Option<Uuid> {
        match self {
            Node::Collection(c) => c.parent_id,
            Node::Item(i) => i.parent_id,
        }
    }

    pub fn owner_id(&self) -> Uuid {
        match self {
            Node::Collection(c) => c.owner_id,
            Node::Item(i) => i.owner_id,
        }
    }

    /// The membership list this node is supposed to be listed in
    pub fn location(&self) -> Location {
        Location::for_parent(self.parent_id(), self.owner_id())
    }

    /// Merge `patch` over the stored attributes and stamp the modifier
    pub fn apply(&mut self, patch: NodePatch, actor: Uuid) {
        let now = Utc::now();
        match self {
            Node::Collection(c) => {
                if let Some(name) = patch.name {
                    c.name = name;
                }
                if let Some(description) = patch.description {
                    c.description = Some(description);
                }
                if let Some(image) = patch.image {
                    c.image = image;
                }
                c.modified_by = Some(actor);
                c.modified_at = now;
            }
            Node::Item(i) => {
                if let Some(name) = patch.name {
                    i.name = name;
                }
                if let Some(item_type) = patch.item_type {
                    i.item_type = item_type;
                }
                if let Some(description) = patch.description {
                    i.description = Some(description);
                }
                if let Some(image) = patch.image {
                    i.image = image;
                }
                i.modified_by = Some(actor);
                i.modified_at = now;
            }
        }
    }
}

/// Why a membership entry could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingReason {
    /// The referenced node no longer exists
    Deleted,
    /// The lookup itself failed
    Unavailable,
}

/// Placeholder for a membership entry that did not resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingNode {
    pub id: Uuid,
    pub kind: NodeKind,
    pub missing: MissingReason,
}

/// A membership entry after lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedChild {
    Present(Node),
    Missing(MissingNode),
}

impl ResolvedChild {
    pub fn missing(node: NodeRef, reason: MissingReason) -> Self {
        ResolvedChild::Missing(MissingNode {
            id: node.id,
            kind: node.kind,
            missing: reason,
        })
    }

    pub fn id(&self) -> Uuid {
        match self {
            ResolvedChild::Present(node) => node.id(),
            ResolvedChild::Missing(missing) => missing.id,
        }
    }
}

/// A collection with its `children` replaced by resolved bodies
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedCollection {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: String,
    pub parent_id: Option<Uuid>,
    pub children: Vec<ResolvedChild>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<Uuid>,
    pub modified_at: DateTime<Utc>,
    pub shared_with: Vec<Share>,
}

impl ExpandedCollection {
    pub fn from_parts(collection: Collection, children: Vec<ResolvedChild>) -> Self {
        Self {
            id: collection.id,
            name: collection.name,
            description: collection.description,
            image: collection.image,
            parent_id: collection.parent_id,
            children,
            owner_id: collection.owner_id,
            created_at: collection.created_at,
            modified_by: collection.modified_by,
            modified_at: collection.modified_at,
            shared_with: collection.shared_with,
        }
    }
}

/// A user with `mainCollection` replaced by resolved bodies
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub image: Option<String>,
    pub main_collection: Vec<ResolvedChild>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn from_parts(user: User, main_collection: Vec<ResolvedChild>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            mobile: user.mobile,
            image: user.image,
            main_collection,
            created_at: user.created_at,
            modified_at: user.modified_at,
        }
    }
}
