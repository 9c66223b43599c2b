//! Account HTTP Handlers
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs    - Module exports
//! ├── signup.rs - POST /users
//! ├── login.rs  - POST /users/login
//! └── users.rs  - authenticated profile routes
//! ```

/// Registration handler
pub mod signup;

/// Login handler
pub mod login;

/// Profile handlers
pub mod users;

// Re-export handlers
pub use login::login;
pub use signup::register;
pub use users::{delete_user, get_user, get_user_roots, list_users, update_user};
