//! Response Envelope
//!
//! Every API response carries a stable outcome code. Successful responses
//! wrap the entity as `payload`; failures carry a message instead (see
//! `backend::error::conversion`).

use serde::{Deserialize, Serialize};

/// Stable outcome codes exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    NotFound,
    Forbidden,
    Invalid,
    Conflict,
    Unauthorized,
    /// Store failure; the request may be retried
    Unavailable,
    Internal,
}

impl Outcome {
    /// Whether a client may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, Outcome::Unavailable)
    }
}

/// Success envelope: `{ "outcome": "Success", "payload": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub outcome: Outcome,
    pub payload: T,
}

impl<T> ApiResponse<T> {
    pub fn success(payload: T) -> Self {
        Self {
            outcome: Outcome::Success,
            payload,
        }
    }
}
