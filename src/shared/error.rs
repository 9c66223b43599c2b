//! Shared Error Types
//!
//! Errors raised while validating or decoding entity input, before any store
//! access happens. The backend wraps these in `BackendError`, where they map
//! to the `Invalid` outcome.
//!
//! # Usage
//!
//! ```rust
//! use entity_manager::shared::error::SharedError;
//!
//! let error = SharedError::validation("name", "Name is required");
//! assert_eq!(error.field(), Some("name"));
//! ```
use thiserror::Error;

/// Input errors that can occur before a request reaches the store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// A required attribute is missing, blank or malformed
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending field, when the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            Self::SerializationError { .. } => None,
        }
    }
}

/// Require a non-blank string attribute
///
/// Returns the trimmed value, or a validation error naming `field`.
pub fn require(field: &str, value: Option<String>) -> Result<String, SharedError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(SharedError::validation(field, format!("{} is required", field))),
    }
}

/// Validate an optional replacement for a required attribute
///
/// `None` means "leave unchanged"; a blank replacement is rejected.
pub fn non_blank(field: &str, value: Option<String>) -> Result<Option<String>, SharedError> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Err(SharedError::validation(
            field,
            format!("{} cannot be blank", field),
        )),
        Some(v) => Ok(Some(v.trim().to_string())),
    }
}
