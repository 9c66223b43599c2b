//! PostgreSQL entity store
//!
//! Users, collections and items live in their own tables. Membership and
//! share lists are JSONB arrays, changed only through single `UPDATE`
//! statements so each append/remove is atomic on its row:
//!
//! - append: `list || [entry]` guarded by `NOT list @> [{"id": ...}]`
//! - remove: rebuild the array from `jsonb_array_elements` in original
//!   order, skipping entries with the id
//!
//! Queries are built at runtime (`sqlx::query`), only the migrations are
//! embedded at compile time.

use async_trait::async_trait;
use serde_json::json;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{EntityStore, MemberAppend, MemberRemoval, ShareAppend, StoreError, StoreResult};
use crate::shared::entities::{Collection, Item, Location, Node, NodeKind, NodeRef, Share, User};

const USER_COLUMNS: &str =
    "id, name, email, mobile, image, password_hash, main_collection, created_at, modified_at";
const COLLECTION_COLUMNS: &str = "id, name, description, image, parent_id, children, owner_id, created_at, modified_by, modified_at, shared_with";
const ITEM_COLUMNS: &str =
    "id, name, item_type, description, image, parent_id, owner_id, created_at, modified_by, modified_at";

/// Entity store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn holder_exists(&self, location: Location) -> StoreResult<bool> {
        let (table, _) = list_column(location);
        let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", table);
        let exists: bool = sqlx::query_scalar(&query)
            .bind(location.holder_id())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

/// Table and JSONB column holding the list at `location`
fn list_column(location: Location) -> (&'static str, &'static str) {
    match location {
        Location::Root(_) => ("users", "main_collection"),
        Location::ChildOf(_) => ("collections", "children"),
    }
}

/// Translate unique violations into `Duplicate`, naming the column
fn map_unique(err: sqlx::Error, value: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some(constraint) if constraint.contains("email") => "email",
                _ => "id",
            };
            return StoreError::Duplicate {
                field: field.to_string(),
                value: value.to_string(),
            };
        }
    }
    StoreError::Backend(err)
}

#[async_trait]
impl EntityStore for PgStore {
    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, mobile, image, password_hash, main_collection, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.mobile)
        .bind(&user.image)
        .bind(&user.password_hash)
        .bind(Json(&user.main_collection))
        .bind(user.created_at)
        .bind(user.modified_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, &user.email))?;
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let query = format!("SELECT {} FROM users ORDER BY created_at ASC", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn update_user(&self, user: &User) -> StoreResult<Option<User>> {
        let query = format!(
            r#"
            UPDATE users
            SET name = $2, email = $3, mobile = $4, image = $5, password_hash = $6, modified_at = $7
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let stored = sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.mobile)
            .bind(&user.image)
            .bind(&user.password_hash)
            .bind(user.modified_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique(e, &user.email))?;
        Ok(stored)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_node(&self, node: &Node) -> StoreResult<()> {
        match node {
            Node::Collection(c) => {
                sqlx::query(
                    r#"
                    INSERT INTO collections (id, name, description, image, parent_id, children, owner_id, created_at, modified_by, modified_at, shared_with)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    "#,
                )
                .bind(c.id)
                .bind(&c.name)
                .bind(&c.description)
                .bind(&c.image)
                .bind(c.parent_id)
                .bind(Json(&c.children))
                .bind(c.owner_id)
                .bind(c.created_at)
                .bind(c.modified_by)
                .bind(c.modified_at)
                .bind(Json(&c.shared_with))
                .execute(&self.pool)
                .await?;
            }
            Node::Item(i) => {
                sqlx::query(
                    r#"
                    INSERT INTO items (id, name, item_type, description, image, parent_id, owner_id, created_at, modified_by, modified_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    "#,
                )
                .bind(i.id)
                .bind(&i.name)
                .bind(&i.item_type)
                .bind(&i.description)
                .bind(&i.image)
                .bind(i.parent_id)
                .bind(i.owner_id)
                .bind(i.created_at)
                .bind(i.modified_by)
                .bind(i.modified_at)
                .execute(&self.pool)
                .await?;
            }
        }
        Ok(())
    }

    async fn get_node(&self, kind: NodeKind, id: Uuid) -> StoreResult<Option<Node>> {
        let node = match kind {
            NodeKind::Collection => {
                let query = format!("SELECT {} FROM collections WHERE id = $1", COLLECTION_COLUMNS);
                sqlx::query_as::<_, Collection>(&query)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
                    .map(Node::Collection)
            }
            NodeKind::Item => {
                let query = format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS);
                sqlx::query_as::<_, Item>(&query)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
                    .map(Node::Item)
            }
        };
        Ok(node)
    }

    async fn list_nodes(&self, kind: NodeKind, owner_id: Uuid) -> StoreResult<Vec<Node>> {
        let nodes = match kind {
            NodeKind::Collection => {
                let query = format!(
                    "SELECT {} FROM collections WHERE owner_id = $1 ORDER BY created_at ASC",
                    COLLECTION_COLUMNS
                );
                sqlx::query_as::<_, Collection>(&query)
                    .bind(owner_id)
                    .fetch_all(&self.pool)
                    .await?
                    .into_iter()
                    .map(Node::Collection)
                    .collect()
            }
            NodeKind::Item => {
                let query = format!(
                    "SELECT {} FROM items WHERE owner_id = $1 ORDER BY created_at ASC",
                    ITEM_COLUMNS
                );
                sqlx::query_as::<_, Item>(&query)
                    .bind(owner_id)
                    .fetch_all(&self.pool)
                    .await?
                    .into_iter()
                    .map(Node::Item)
                    .collect()
            }
        };
        Ok(nodes)
    }

    async fn update_node(&self, node: &Node) -> StoreResult<Option<Node>> {
        let stored = match node {
            Node::Collection(c) => {
                let query = format!(
                    r#"
                    UPDATE collections
                    SET name = $2, description = $3, image = $4, modified_by = $5, modified_at = $6
                    WHERE id = $1
                    RETURNING {}
                    "#,
                    COLLECTION_COLUMNS
                );
                sqlx::query_as::<_, Collection>(&query)
                    .bind(c.id)
                    .bind(&c.name)
                    .bind(&c.description)
                    .bind(&c.image)
                    .bind(c.modified_by)
                    .bind(c.modified_at)
                    .fetch_optional(&self.pool)
                    .await?
                    .map(Node::Collection)
            }
            Node::Item(i) => {
                let query = format!(
                    r#"
                    UPDATE items
                    SET name = $2, item_type = $3, description = $4, image = $5, modified_by = $6, modified_at = $7
                    WHERE id = $1
                    RETURNING {}
                    "#,
                    ITEM_COLUMNS
                );
                sqlx::query_as::<_, Item>(&query)
                    .bind(i.id)
                    .bind(&i.name)
                    .bind(&i.item_type)
                    .bind(&i.description)
                    .bind(&i.image)
                    .bind(i.modified_by)
                    .bind(i.modified_at)
                    .fetch_optional(&self.pool)
                    .await?
                    .map(Node::Item)
            }
        };
        Ok(stored)
    }

    async fn delete_node(&self, node: NodeRef) -> StoreResult<bool> {
        let query = match node.kind {
            NodeKind::Collection => "DELETE FROM collections WHERE id = $1",
            NodeKind::Item => "DELETE FROM items WHERE id = $1",
        };
        let result = sqlx::query(query).bind(node.id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn append_member(&self, location: Location, node: NodeRef) -> StoreResult<MemberAppend> {
        let (table, column) = list_column(location);
        let query = format!(
            "UPDATE {table} SET {column} = {column} || $2 WHERE id = $1 AND NOT ({column} @> $3)"
        );
        let result = sqlx::query(&query)
            .bind(location.holder_id())
            .bind(Json(json!([node])))
            .bind(Json(json!([{ "id": node.id }])))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            Ok(MemberAppend::Appended)
        } else if self.holder_exists(location).await? {
            Ok(MemberAppend::AlreadyPresent)
        } else {
            Ok(MemberAppend::ListMissing)
        }
    }

    async fn remove_member(&self, location: Location, node_id: Uuid) -> StoreResult<MemberRemoval> {
        let (table, column) = list_column(location);
        let query = format!(
            r#"
            UPDATE {table}
            SET {column} = COALESCE(
                (SELECT jsonb_agg(e.value ORDER BY e.ord)
                 FROM jsonb_array_elements({column}) WITH ORDINALITY AS e(value, ord)
                 WHERE e.value->>'id' <> $2),
                '[]'::jsonb)
            WHERE id = $1 AND {column} @> $3
            "#
        );
        let result = sqlx::query(&query)
            .bind(location.holder_id())
            .bind(node_id.to_string())
            .bind(Json(json!([{ "id": node_id }])))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            Ok(MemberRemoval::Removed)
        } else if self.holder_exists(location).await? {
            Ok(MemberRemoval::NotPresent)
        } else {
            Ok(MemberRemoval::ListMissing)
        }
    }

    async fn append_share(&self, collection_id: Uuid, share: &Share) -> StoreResult<ShareAppend> {
        let result = sqlx::query(
            r#"
            UPDATE collections
            SET shared_with = shared_with || $2
            WHERE id = $1 AND NOT (shared_with @> $3)
            "#,
        )
        .bind(collection_id)
        .bind(Json(json!([share])))
        .bind(Json(json!([{ "toUserId": share.to_user_id }])))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            Ok(ShareAppend::Appended)
        } else if self.holder_exists(Location::ChildOf(collection_id)).await? {
            Ok(ShareAppend::AlreadyShared)
        } else {
            Ok(ShareAppend::CollectionMissing)
        }
    }
}
