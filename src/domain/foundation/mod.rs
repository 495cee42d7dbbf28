//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the LearnLoop entitlement domain.

mod ids;
mod timestamp;
mod errors;

pub use ids::{SubscriptionId, TrialId, UserId};
pub use timestamp::Timestamp;
pub use errors::ValidationError;
