//! Cache key layout.
//!
//! One namespace per record family, keyed by user. Shared between the
//! resolvers and the billing handlers so both sides of a write-through
//! agree on the entry being written.

use crate::domain::foundation::UserId;

/// Serialized TrialRecord blob.
pub(crate) fn trial_status(user_id: &UserId) -> String {
    format!("trial_status:{}", user_id.as_str())
}

/// Boolean subscription-active flag.
pub(crate) fn subscription_active(user_id: &UserId) -> String {
    format!("subscription_active:{}", user_id.as_str())
}

/// Serialized SubscriptionRecord blob.
pub(crate) fn subscription_meta(user_id: &UserId) -> String {
    format!("subscription_meta:{}", user_id.as_str())
}
