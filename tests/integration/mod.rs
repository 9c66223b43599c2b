//! Integration tests driving the full axum router

pub mod api;
