//! Authentication Module
//!
//! Accounts, bearer tokens and the account HTTP handlers.
//!
//! # Architecture
//!
//! - **`users`** - registration, login and profile operations over the store
//! - **`sessions`** - JWT creation and verification
//! - **`handlers`** - axum handlers for `/api/v1/users`
//!
//! # Authentication Flow
//!
//! 1. `POST /users` creates an account (bcrypt-hashed password)
//! 2. `POST /users/login` returns a token signed with `JWT_SECRET`
//! 3. Clients send `Authorization: Bearer <token>`; `auth_middleware`
//!    verifies it and hands the caller to handlers via `AuthUser`

/// Account operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for account endpoints
pub mod handlers;

// Re-export commonly used handlers
pub use handlers::{login, register};
