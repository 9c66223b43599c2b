//! Item API integration tests

use axum::http::StatusCode;
use entity_manager::backend::store::EntityStore;
use entity_manager::shared::NodeRef;
use serde_json::json;
use uuid::Uuid;

use crate::common::{create_unique_test_user, TestApp};
use crate::{assert_contains, assert_outcome};

#[tokio::test]
async fn test_item_at_root_lifecycle() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;

    let response = app
        .post(
            "/api/v1/items",
            &user.token,
            json!({ "name": "Dune", "type": "book", "image": "dune.png", "parentId": "0" }),
        )
        .await;
    let body = assert_outcome!(response, StatusCode::CREATED, "Success");
    assert_eq!(body["payload"]["node"]["kind"], "Item");
    assert_eq!(body["payload"]["node"]["type"], "book");
    let id = Uuid::parse_str(body["payload"]["node"]["id"].as_str().unwrap()).unwrap();

    let stored = app.store.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(stored.main_collection, vec![NodeRef::item(id)]);

    let response = app
        .put(&format!("/api/v1/items/{}", id), &user.token, json!({ "type": "ebook" }))
        .await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    assert_eq!(body["payload"]["type"], "ebook");
    assert_eq!(body["payload"]["name"], "Dune");

    let response = app.delete(&format!("/api/v1/items/{}", id), &user.token).await;
    assert_outcome!(response, StatusCode::OK, "Success");

    let stored = app.store.get_user(user.id).await.unwrap().unwrap();
    assert!(stored.main_collection.is_empty());

    let response = app.delete(&format!("/api/v1/items/{}", id), &user.token).await;
    assert_outcome!(response, StatusCode::NOT_FOUND, "NotFound");
}

#[tokio::test]
async fn test_item_requires_type() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;

    let response = app
        .post("/api/v1/items", &user.token, json!({ "name": "Mystery", "image": "m.png" }))
        .await;
    let body = assert_outcome!(response, StatusCode::BAD_REQUEST, "Invalid");
    assert_contains!(body["message"].as_str().unwrap(), "type");
}

#[tokio::test]
async fn test_blank_name_on_update_is_invalid() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;

    let response = app
        .post(
            "/api/v1/items",
            &user.token,
            json!({ "name": "Dune", "type": "book", "image": "dune.png" }),
        )
        .await;
    let body = assert_outcome!(response, StatusCode::CREATED, "Success");
    let id = body["payload"]["node"]["id"].as_str().unwrap().to_string();

    let response = app
        .put(&format!("/api/v1/items/{}", id), &user.token, json!({ "name": "  " }))
        .await;
    assert_outcome!(response, StatusCode::BAD_REQUEST, "Invalid");
}

#[tokio::test]
async fn test_item_id_is_not_a_collection() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;

    let response = app
        .post(
            "/api/v1/items",
            &user.token,
            json!({ "name": "Dune", "type": "book", "image": "dune.png" }),
        )
        .await;
    let body = assert_outcome!(response, StatusCode::CREATED, "Success");
    let id = body["payload"]["node"]["id"].as_str().unwrap().to_string();

    let response = app.get(&format!("/api/v1/collections/{}", id), &user.token).await;
    assert_outcome!(response, StatusCode::NOT_FOUND, "NotFound");
}

#[tokio::test]
async fn test_list_items() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;

    for name in ["First", "Second"] {
        let response = app
            .post(
                "/api/v1/items",
                &user.token,
                json!({ "name": name, "type": "note", "image": "n.png" }),
            )
            .await;
        assert_outcome!(response, StatusCode::CREATED, "Success");
    }

    let response = app.get("/api/v1/items", &user.token).await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    let names: Vec<&str> = body["payload"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["First", "Second"]);
}
