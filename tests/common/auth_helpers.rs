//! Authentication test helpers
//!
//! Provides utilities for creating test users through the public API and
//! generating tokens directly.

use axum::http::{Method, StatusCode};
use entity_manager::backend::auth::sessions::create_token;
use serde_json::json;
use uuid::Uuid;

use super::server::{test_config, TestApp};

pub const TEST_PASSWORD: &str = "test_password_123";

/// Test user credentials
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Register a user and log them in
pub async fn create_test_user(app: &TestApp, email: &str) -> TestUser {
    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({
                "name": "Test User",
                "email": email,
                "mobile": "555-0100",
                "password": TEST_PASSWORD,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/users/login",
            None,
            Some(json!({ "email": email, "password": TEST_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);

    let token = body["payload"]["token"]
        .as_str()
        .expect("token in login response")
        .to_string();
    let id = body["payload"]["user"]["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("user id in login response");

    TestUser {
        id,
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        token,
    }
}

/// Create a test user with a unique email
pub async fn create_unique_test_user(app: &TestApp) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4());
    create_test_user(app, &email).await
}

/// Generate a token without going through login
pub fn generate_test_token(user_id: Uuid, email: &str) -> String {
    create_token(user_id, email, &test_config()).expect("Failed to generate test token")
}
