//! Subscription status values.
//!
//! Status is written by the payment collaborator and read by this engine;
//! no transitions happen here. A cancellation request flips
//! `cancel_at_period_end` on the record, never the status itself.

use crate::domain::foundation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription billing status as recorded by the payment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Paid and current. Whether access is actually granted also depends
    /// on the cancellation flag and period dates.
    Active,

    /// Cancellation has taken effect; the paid period has lapsed.
    Canceled,

    /// Subscription ended without renewal.
    Expired,
}

impl SubscriptionStatus {
    /// Returns the canonical storage string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Expired => "expired",
        }
    }

    /// Parses a storage string back into a status.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "canceled" => Ok(SubscriptionStatus::Canceled),
            "expired" => Ok(SubscriptionStatus::Expired),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown subscription status '{}'", other),
            )),
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
