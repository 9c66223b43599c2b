//! Test suite for the entity manager
//!
//! This module organizes all integration tests. Unit tests live beside the
//! code in `#[cfg(test)]` modules.

pub mod common;
pub mod integration;
