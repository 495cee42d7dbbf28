//! Trial-specific error types.
//!
//! Surfaced by the admin-facing lifecycle operations (extend, terminate).
//! The entitlement resolution path never propagates these; it degrades to
//! the fail-closed default instead.

use crate::domain::foundation::UserId;
use thiserror::Error;

/// Trial lifecycle errors.
#[derive(Debug, Clone, Error)]
pub enum TrialError {
    /// No trial record exists for this user, in the remote store or cache.
    #[error("No trial found for user: {0}")]
    NotFound(UserId),

    /// Operation is invalid for the current record state.
    #[error("Cannot {attempted} a {current} trial")]
    InvalidState { current: String, attempted: String },

    /// Extension length is out of range.
    #[error("Invalid trial extension: {days} days")]
    InvalidExtension { days: i32 },
}

impl TrialError {
    pub fn not_found(user_id: UserId) -> Self {
        TrialError::NotFound(user_id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        TrialError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn invalid_extension(days: i32) -> Self {
        TrialError::InvalidExtension { days }
    }
}
