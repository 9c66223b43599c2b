//! In-process app helpers
//!
//! Builds the full router over a fresh `MemoryStore` and sends requests
//! through it with `tower::ServiceExt::oneshot`, no sockets involved.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use entity_manager::backend::server::create_app_with_store;
use entity_manager::backend::store::MemoryStore;
use entity_manager::shared::AppConfig;
use serde_json::Value;
use tower::ServiceExt;

/// Configuration for tests: cheap bcrypt, fixed secret
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret("integration-test-secret")
        .bcrypt_cost(4)
        .build()
        .expect("valid test configuration")
}

/// The router plus direct access to its store
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = create_app_with_store(store.clone(), test_config());
        Self { router, store }
    }

    /// Send a request and decode the JSON body
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, json)
    }

    pub async fn get(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, path, Some(token), None).await
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, path, Some(token), Some(body)).await
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, path, Some(token), Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, path, Some(token), None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
