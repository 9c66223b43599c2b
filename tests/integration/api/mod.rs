//! HTTP API tests

pub mod collections_test;
pub mod items_test;
pub mod users_test;
