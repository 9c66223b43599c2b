//! Collection API integration tests
//!
//! Covers membership bookkeeping through the HTTP surface: root and child
//! placement, cascading delete, dangling children and sharing.

use axum::http::StatusCode;
use entity_manager::backend::store::EntityStore;
use entity_manager::shared::NodeRef;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{create_unique_test_user, TestApp, TestUser};
use crate::{assert_contains, assert_outcome};

async fn create_collection(app: &TestApp, user: &TestUser, name: &str, parent: Option<Uuid>) -> Uuid {
    let mut body = json!({ "name": name, "image": format!("{}.png", name) });
    if let Some(parent) = parent {
        body["parentId"] = json!(parent.to_string());
    }
    let response = app.post("/api/v1/collections", &user.token, body).await;
    let body = assert_outcome!(response, StatusCode::CREATED, "Success");
    assert_eq!(body["payload"]["linkage"]["status"], "linked");
    id_of(&body["payload"]["node"])
}

async fn create_item(app: &TestApp, user: &TestUser, name: &str, parent: Uuid) -> Uuid {
    let response = app
        .post(
            "/api/v1/items",
            &user.token,
            json!({
                "name": name,
                "type": "book",
                "image": format!("{}.png", name),
                "parentId": parent.to_string(),
            }),
        )
        .await;
    let body = assert_outcome!(response, StatusCode::CREATED, "Success");
    id_of(&body["payload"]["node"])
}

fn id_of(node: &Value) -> Uuid {
    node["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("node id")
}

async fn roots(app: &TestApp, user: &TestUser) -> Vec<NodeRef> {
    app.store.get_user(user.id).await.unwrap().unwrap().main_collection
}

#[tokio::test]
async fn test_root_child_and_cascade_lifecycle() {
    let app = TestApp::new();
    let u1 = create_unique_test_user(&app).await;

    // C1 at the root
    let c1 = create_collection(&app, &u1, "C1", None).await;
    assert_eq!(roots(&app, &u1).await, vec![NodeRef::collection(c1)]);

    // I1 under C1; the root list is untouched
    let i1 = create_item(&app, &u1, "I1", c1).await;
    let response = app.get(&format!("/api/v1/collections/{}", c1), &u1.token).await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    let children = body["payload"]["children"].as_array().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["id"], i1.to_string());
    assert_eq!(children[0]["kind"], "Item");
    assert_eq!(roots(&app, &u1).await, vec![NodeRef::collection(c1)]);

    // The user's profile resolves the root list
    let response = app.get(&format!("/api/v1/users/{}/collection", u1.id), &u1.token).await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    assert_eq!(body["payload"][0]["name"], "C1");

    // Deleting C1 empties the root list and takes I1 with it
    let response = app.delete(&format!("/api/v1/collections/{}", c1), &u1.token).await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    assert_eq!(body["payload"]["removed"].as_array().unwrap().len(), 2);
    assert!(roots(&app, &u1).await.is_empty());

    let response = app.get(&format!("/api/v1/items/{}", i1), &u1.token).await;
    assert_outcome!(response, StatusCode::NOT_FOUND, "NotFound");

    // A second delete finds nothing
    let response = app.delete(&format!("/api/v1/collections/{}", c1), &u1.token).await;
    assert_outcome!(response, StatusCode::NOT_FOUND, "NotFound");
}

#[tokio::test]
async fn test_sentinel_parent_ids_mean_root() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;

    for parent in [json!("0"), json!(""), json!("null"), Value::Null] {
        let response = app
            .post(
                "/api/v1/collections",
                &user.token,
                json!({ "name": "Top", "image": "top.png", "parentId": parent }),
            )
            .await;
        let body = assert_outcome!(response, StatusCode::CREATED, "Success");
        assert!(body["payload"]["node"]["parentId"].is_null());
    }

    assert_eq!(roots(&app, &user).await.len(), 4);
}

#[tokio::test]
async fn test_create_missing_image_is_invalid() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;

    let response = app
        .post("/api/v1/collections", &user.token, json!({ "name": "No image" }))
        .await;
    let body = assert_outcome!(response, StatusCode::BAD_REQUEST, "Invalid");
    assert_contains!(body["message"].as_str().unwrap(), "image");
    assert!(roots(&app, &user).await.is_empty());
}

#[tokio::test]
async fn test_create_under_missing_parent_is_unlinked() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;
    let ghost = Uuid::new_v4();

    let response = app
        .post(
            "/api/v1/collections",
            &user.token,
            json!({ "name": "Orphan", "image": "o.png", "parentId": ghost.to_string() }),
        )
        .await;
    let body = assert_outcome!(response, StatusCode::CREATED, "Success");
    assert_eq!(body["payload"]["linkage"]["status"], "unlinked");
    assert_contains!(
        body["payload"]["linkage"]["reason"].as_str().unwrap(),
        &ghost.to_string()
    );

    // The node exists but is listed nowhere
    let id = id_of(&body["payload"]["node"]);
    let response = app.get(&format!("/api/v1/collections/{}", id), &user.token).await;
    assert_outcome!(response, StatusCode::OK, "Success");
    assert!(roots(&app, &user).await.is_empty());
}

#[tokio::test]
async fn test_dangling_child_is_marked_missing() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;
    let c1 = create_collection(&app, &user, "C1", None).await;
    let stale = create_item(&app, &user, "Stale", c1).await;
    let fresh = create_item(&app, &user, "Fresh", c1).await;

    app.store.delete_node(NodeRef::item(stale)).await.unwrap();

    let response = app
        .get(&format!("/api/v1/collections/{}/children", c1), &user.token)
        .await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    let children = body["payload"].as_array().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["id"], stale.to_string());
    assert_eq!(children[0]["missing"], "deleted");
    assert_eq!(children[1]["id"], fresh.to_string());
    assert_eq!(children[1]["name"], "Fresh");
}

#[tokio::test]
async fn test_item_path_lists_children() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;
    let c1 = create_collection(&app, &user, "C1", None).await;
    let i1 = create_item(&app, &user, "I1", c1).await;

    let response = app
        .get(&format!("/api/v1/collections/{}/item", c1), &user.token)
        .await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    let children = body["payload"].as_array().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["id"], i1.to_string());

    let canonical = app
        .get(&format!("/api/v1/collections/{}/children", c1), &user.token)
        .await;
    assert_eq!(canonical.1["payload"], body["payload"]);
}

#[tokio::test]
async fn test_update_discards_placement_fields() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;
    let c1 = create_collection(&app, &user, "C1", None).await;
    let c2 = create_collection(&app, &user, "C2", None).await;

    let response = app
        .put(
            &format!("/api/v1/collections/{}", c1),
            &user.token,
            json!({ "name": "Renamed", "parentId": c2.to_string(), "ownerId": Uuid::new_v4() }),
        )
        .await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    assert_eq!(body["payload"]["name"], "Renamed");
    assert!(body["payload"]["parentId"].is_null());
    assert_eq!(body["payload"]["ownerId"], user.id.to_string());
    assert_eq!(body["payload"]["modifiedBy"], user.id.to_string());
    assert_eq!(
        roots(&app, &user).await,
        vec![NodeRef::collection(c1), NodeRef::collection(c2)]
    );
}

#[tokio::test]
async fn test_non_owner_cannot_update_or_delete() {
    let app = TestApp::new();
    let owner = create_unique_test_user(&app).await;
    let other = create_unique_test_user(&app).await;
    let c1 = create_collection(&app, &owner, "C1", None).await;

    let response = app
        .put(&format!("/api/v1/collections/{}", c1), &other.token, json!({ "name": "Mine now" }))
        .await;
    assert_outcome!(response, StatusCode::FORBIDDEN, "Forbidden");

    let response = app.delete(&format!("/api/v1/collections/{}", c1), &other.token).await;
    assert_outcome!(response, StatusCode::FORBIDDEN, "Forbidden");
    assert_eq!(roots(&app, &owner).await, vec![NodeRef::collection(c1)]);
}

#[tokio::test]
async fn test_share_collection() {
    let app = TestApp::new();
    let owner = create_unique_test_user(&app).await;
    let friend = create_unique_test_user(&app).await;
    let c1 = create_collection(&app, &owner, "C1", None).await;
    let path = format!("/api/v1/collections/{}/share", c1);

    // Only the owner may share
    let response = app
        .post(&path, &friend.token, json!({ "toUserId": friend.id.to_string() }))
        .await;
    assert_outcome!(response, StatusCode::FORBIDDEN, "Forbidden");

    let response = app
        .post(&path, &owner.token, json!({ "toUserId": friend.id.to_string() }))
        .await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    let shares = body["payload"]["sharedWith"].as_array().unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0]["toUserId"], friend.id.to_string());
    assert_eq!(shares[0]["fromUserId"], owner.id.to_string());

    // Sharing again conflicts and leaves one entry
    let response = app
        .post(&path, &owner.token, json!({ "toUserId": friend.id.to_string() }))
        .await;
    assert_outcome!(response, StatusCode::CONFLICT, "Conflict");

    let response = app.get(&format!("/api/v1/collections/{}", c1), &owner.token).await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    assert_eq!(body["payload"]["sharedWith"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_share_with_unknown_user_is_not_found() {
    let app = TestApp::new();
    let owner = create_unique_test_user(&app).await;
    let c1 = create_collection(&app, &owner, "C1", None).await;

    let response = app
        .post(
            &format!("/api/v1/collections/{}/share", c1),
            &owner.token,
            json!({ "toUserId": Uuid::new_v4().to_string() }),
        )
        .await;
    assert_outcome!(response, StatusCode::NOT_FOUND, "NotFound");
}

#[tokio::test]
async fn test_list_collections_only_returns_own() {
    let app = TestApp::new();
    let ada = create_unique_test_user(&app).await;
    let bob = create_unique_test_user(&app).await;
    create_collection(&app, &ada, "Ada's", None).await;
    create_collection(&app, &bob, "Bob's", None).await;

    let response = app.get("/api/v1/collections", &ada.token).await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    let listed = body["payload"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "Ada's");
}
