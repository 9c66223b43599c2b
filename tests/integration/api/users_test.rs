//! Account API integration tests
//!
//! Registration, login, bearer-token enforcement and self-only profile
//! changes.

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::common::{create_test_user, create_unique_test_user, generate_test_token, TestApp};
use crate::{assert_contains, assert_outcome};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();

    let response = app
        .send(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "mobile": "555-0100",
                "password": "password123"
            })),
        )
        .await;

    let body = assert_outcome!(response, StatusCode::CREATED, "Success");
    assert_eq!(body["payload"]["email"], "ada@example.com");
    assert_eq!(body["payload"]["mainCollection"], json!([]));
    assert!(body["payload"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    create_test_user(&app, "dup@example.com").await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({
                "name": "Again",
                "email": "dup@example.com",
                "mobile": "555-0199",
                "password": "password123"
            })),
        )
        .await;

    let body = assert_outcome!(response, StatusCode::CONFLICT, "Conflict");
    assert_contains!(body["message"].as_str().unwrap(), "dup@example.com");
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn test_register_missing_field_is_invalid() {
    let app = TestApp::new();

    let response = app
        .send(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({ "name": "NoEmail", "mobile": "1", "password": "password123" })),
        )
        .await;

    let body = assert_outcome!(response, StatusCode::BAD_REQUEST, "Invalid");
    assert_contains!(body["message"].as_str().unwrap(), "email");
}

#[tokio::test]
async fn test_malformed_body_is_invalid() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;

    let response = app
        .send(Method::POST, "/api/v1/collections", Some(&user.token), Some(json!("not an object")))
        .await;

    assert_outcome!(response, StatusCode::BAD_REQUEST, "Invalid");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/users/login",
            None,
            Some(json!({ "email": user.email, "password": "wrong-password" })),
        )
        .await;

    let body = assert_outcome!(response, StatusCode::UNAUTHORIZED, "Unauthorized");
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new();

    for path in ["/api/v1/users/listing", "/api/v1/collections", "/api/v1/items"] {
        let response = app.send(Method::GET, path, None, None).await;
        assert_outcome!(response, StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let response = app.get("/api/v1/collections", "garbage-token").await;
    assert_outcome!(response, StatusCode::UNAUTHORIZED, "Unauthorized");
}

#[tokio::test]
async fn test_token_for_unknown_user_is_rejected() {
    let app = TestApp::new();
    let token = generate_test_token(Uuid::new_v4(), "ghost@example.com");

    let response = app.get("/api/v1/users/listing", &token).await;
    assert_outcome!(response, StatusCode::UNAUTHORIZED, "Unauthorized");
}

#[tokio::test]
async fn test_listing_and_profile() {
    let app = TestApp::new();
    let ada = create_test_user(&app, "ada@example.com").await;
    create_test_user(&app, "bob@example.com").await;

    let response = app.get("/api/v1/users/listing", &ada.token).await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    assert_eq!(body["payload"].as_array().unwrap().len(), 2);

    let response = app.get(&format!("/api/v1/users/{}", ada.id), &ada.token).await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    assert_eq!(body["payload"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_update_other_user_is_forbidden() {
    let app = TestApp::new();
    let ada = create_unique_test_user(&app).await;
    let bob = create_unique_test_user(&app).await;

    let response = app
        .put(&format!("/api/v1/users/{}", ada.id), &bob.token, json!({ "name": "Hijacked" }))
        .await;
    assert_outcome!(response, StatusCode::FORBIDDEN, "Forbidden");

    let response = app.delete(&format!("/api/v1/users/{}", ada.id), &bob.token).await;
    assert_outcome!(response, StatusCode::FORBIDDEN, "Forbidden");
}

#[tokio::test]
async fn test_update_and_delete_self() {
    let app = TestApp::new();
    let ada = create_unique_test_user(&app).await;

    let response = app
        .put(&format!("/api/v1/users/{}", ada.id), &ada.token, json!({ "mobile": "555-0111" }))
        .await;
    let body = assert_outcome!(response, StatusCode::OK, "Success");
    assert_eq!(body["payload"]["mobile"], "555-0111");

    let response = app.delete(&format!("/api/v1/users/{}", ada.id), &ada.token).await;
    assert_outcome!(response, StatusCode::OK, "Success");

    // The token now names a user that no longer exists
    let response = app.get("/api/v1/users/listing", &ada.token).await;
    assert_outcome!(response, StatusCode::UNAUTHORIZED, "Unauthorized");
}

#[tokio::test]
async fn test_malformed_id_is_invalid() {
    let app = TestApp::new();
    let user = create_unique_test_user(&app).await;

    let response = app.get("/api/v1/users/not-a-uuid", &user.token).await;
    assert_outcome!(response, StatusCode::BAD_REQUEST, "Invalid");
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = TestApp::new();
    let response = app.send(Method::GET, "/api/v1/nowhere", None, None).await;
    assert_outcome!(response, StatusCode::NOT_FOUND, "NotFound");
}
