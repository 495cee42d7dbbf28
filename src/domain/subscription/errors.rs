//! Billing-specific error types.

use crate::domain::foundation::{UserId, ValidationError};
use thiserror::Error;

/// Errors surfaced by the billing handlers.
#[derive(Debug, Clone, Error)]
pub enum BillingError {
    /// No active subscription exists to operate on.
    #[error("No active subscription found for user: {0}")]
    NoActiveSubscription(UserId),

    /// Payment confirmation payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl BillingError {
    pub fn no_active_subscription(user_id: UserId) -> Self {
        BillingError::NoActiveSubscription(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_active_subscription_message_includes_user() {
        let err = BillingError::no_active_subscription(UserId::new("user-9").unwrap());
        assert_eq!(
            format!("{}", err),
            "No active subscription found for user: user-9"
        );
    }

    #[test]
    fn wraps_validation_errors_transparently() {
        let err: BillingError = ValidationError::empty_field("plan_name").into();
        assert_eq!(format!("{}", err), "Field 'plan_name' cannot be empty");
    }
}
