/**
 * Backend Error Types
 *
 * Every failure a handler can return. Each variant maps to one stable
 * `Outcome` code and one HTTP status.
 *
 * # Error Categories
 *
 * ## Domain Errors
 *
 * Raised by the tree and account operations themselves:
 * - missing targets, parents or share targets (`NotFound`)
 * - non-owner mutations (`Forbidden`)
 * - duplicate shares and unique fields (`Conflict`)
 *
 * ## Input Errors
 *
 * Validation failures from the shared module surface as `Invalid`.
 *
 * ## Infrastructure Errors
 *
 * Store failures surface as `Unavailable` with a generic message; the raw
 * engine error is logged where it is converted, never sent to the client.
 * Hashing and token signing failures are `Internal`.
 */

use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::store::StoreError;
use crate::shared::{NodeKind, Outcome, SharedError};

/// Message sent for any store failure
pub const STORE_FAILURE_MESSAGE: &str = "A storage error occurred. Please try again later.";

/// Message sent for any credential failure during login
pub const BAD_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use entity_manager::backend::error::BackendError;
/// use entity_manager::shared::NodeKind;
/// use uuid::Uuid;
///
/// let err = BackendError::not_found(NodeKind::Item, Uuid::nil());
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// The addressed record does not exist
    #[error("{message}")]
    NotFound { message: String },

    /// The caller may not perform this action on the record
    #[error("{message}")]
    Forbidden { message: String },

    /// Request input failed validation
    #[error(transparent)]
    Invalid(#[from] SharedError),

    /// A unique field already holds the value
    #[error("{message}")]
    Conflict { field: String, message: String },

    /// The collection is already shared with the target user
    #[error("Collection {collection_id} is already shared with user {user_id}")]
    AlreadyShared { collection_id: Uuid, user_id: Uuid },

    /// Missing or invalid credentials
    #[error("{message}")]
    Unauthorized { message: String },

    /// The store failed
    #[error("Store error: {0}")]
    Store(StoreError),

    /// Hashing or token signing failed
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BackendError {
    /// Create a not-found error for a node
    pub fn not_found(kind: NodeKind, id: Uuid) -> Self {
        Self::NotFound {
            message: format!("{} {} not found", kind, id),
        }
    }

    /// Create a not-found error for a user
    pub fn user_not_found(id: Uuid) -> Self {
        Self::NotFound {
            message: format!("User {} not found", id),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Login failure; identical for unknown email and wrong password
    pub fn bad_credentials() -> Self {
        Self::unauthorized(BAD_CREDENTIALS_MESSAGE)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Conflict on the email unique constraint
    pub fn duplicate_email(email: &str) -> Self {
        Self::Conflict {
            field: "email".to_string(),
            message: format!(
                "Email '{}' already exists. Please use a different email.",
                email
            ),
        }
    }

    /// Stable outcome code for this error
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::NotFound { .. } => Outcome::NotFound,
            Self::Forbidden { .. } => Outcome::Forbidden,
            Self::Invalid(_) => Outcome::Invalid,
            Self::Conflict { .. } | Self::AlreadyShared { .. } => Outcome::Conflict,
            Self::Unauthorized { .. } => Outcome::Unauthorized,
            Self::Store(_) => Outcome::Unavailable,
            Self::Internal { .. } => Outcome::Internal,
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404
    /// - `Forbidden` - 403
    /// - `Invalid` - 400
    /// - `Conflict`, `AlreadyShared` - 409
    /// - `Unauthorized` - 401
    /// - `Store` - 503
    /// - `Internal` - 500
    pub fn status_code(&self) -> StatusCode {
        match self.outcome() {
            Outcome::NotFound => StatusCode::NOT_FOUND,
            Outcome::Forbidden => StatusCode::FORBIDDEN,
            Outcome::Invalid => StatusCode::BAD_REQUEST,
            Outcome::Conflict => StatusCode::CONFLICT,
            Outcome::Unauthorized => StatusCode::UNAUTHORIZED,
            Outcome::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Outcome::Internal | Outcome::Success => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message
    ///
    /// Store failures never leak the engine error.
    pub fn message(&self) -> String {
        match self {
            Self::Store(_) => STORE_FAILURE_MESSAGE.to_string(),
            Self::Internal { .. } => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field, value } if field == "email" => {
                Self::duplicate_email(&value)
            }
            StoreError::Duplicate { field, value } => Self::Conflict {
                message: format!("{} '{}' already exists", field, value),
                field,
            },
            other => {
                tracing::error!("Store failure: {:?}", other);
                Self::Store(other)
            }
        }
    }
}
