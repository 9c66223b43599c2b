//! API Request and Response Types
//!
//! Request bodies keep every attribute optional so that a missing field is
//! reported as an `Invalid` outcome naming the field, instead of a generic
//! JSON rejection. Fields a request must never change (ids, owners,
//! timestamps, parent links) are simply not declared and are dropped by
//! serde when present.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::entities::{parse_parent_id, Node, NodeDraft, NodePatch, NodeRef, User};
use crate::shared::error::{non_blank, require, SharedError};

/// Body of `POST /collections`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    /// `"0"`, `""` or null place the collection at the caller's root
    pub parent_id: Option<String>,
}

impl CreateCollectionRequest {
    pub fn into_draft(self) -> Result<(NodeDraft, Option<Uuid>), SharedError> {
        let parent_id = parse_parent_id(self.parent_id.as_deref())?;
        let draft = NodeDraft::Collection {
            name: require("name", self.name)?,
            description: self.description,
            image: require("image", self.image)?,
        };
        Ok((draft, parent_id))
    }
}

/// Body of `POST /items`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<String>,
}

impl CreateItemRequest {
    pub fn into_draft(self) -> Result<(NodeDraft, Option<Uuid>), SharedError> {
        let parent_id = parse_parent_id(self.parent_id.as_deref())?;
        let draft = NodeDraft::Item {
            name: require("name", self.name)?,
            item_type: require("type", self.item_type)?,
            description: self.description,
            image: require("image", self.image)?,
        };
        Ok((draft, parent_id))
    }
}

/// Body of `PUT /collections/{id}` and `PUT /items/{id}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}

impl UpdateNodeRequest {
    pub fn into_patch(self) -> Result<NodePatch, SharedError> {
        Ok(NodePatch {
            name: non_blank("name", self.name)?,
            description: self.description,
            image: non_blank("image", self.image)?,
            item_type: non_blank("type", self.item_type)?,
        })
    }
}

/// Body of `POST /collections/{id}/share`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareCollectionRequest {
    pub to_user_id: Option<String>,
}

impl ShareCollectionRequest {
    pub fn target(&self) -> Result<Uuid, SharedError> {
        let raw = self
            .to_user_id
            .as_deref()
            .ok_or_else(|| SharedError::validation("toUserId", "toUserId is required"))?;
        Uuid::parse_str(raw.trim())
            .map_err(|_| SharedError::validation("toUserId", format!("'{}' is not a valid id", raw)))
    }
}

/// Body of `POST /users`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub image: Option<String>,
    pub password: Option<String>,
}

/// Body of `PUT /users/{id}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub image: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /users/login`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Bearer token
    pub token: String,
    pub user: User,
}

/// Whether a freshly created node made it into its membership list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Linkage {
    Linked,
    /// The node exists but no membership list references it
    Unlinked { reason: String },
}

/// Result of a create
#[derive(Debug, Clone, Serialize)]
pub struct CreatedNode {
    pub node: Node,
    pub linkage: Linkage,
}

impl CreatedNode {
    pub fn is_linked(&self) -> bool {
        self.linkage == Linkage::Linked
    }
}

/// Result of a delete
#[derive(Debug, Clone, Serialize)]
pub struct DeletedNodes {
    pub message: String,
    /// The node itself plus, for collections, every descendant
    pub removed: Vec<NodeRef>,
}
