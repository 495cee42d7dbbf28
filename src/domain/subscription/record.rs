//! Subscription record entity.
//!
//! Created by the payment-success collaborator, mutated only by a
//! cancellation request, and otherwise read-only from the entitlement
//! engine's perspective.
//!
//! # Design Decisions
//!
//! - **Money in cents**: All monetary values stored as i64 cents (not floats)
//! - **Explicit absence**: Period dates the collaborator never supplied are
//!   `None`, and an absent date counts against access, not for it
//! - **Grace period**: A cancellation request does not revoke access until
//!   the paid period lapses

use crate::domain::foundation::{SubscriptionId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::SubscriptionStatus;

/// Subscription record - a user's paid access as reported by billing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// Unique identifier for this subscription.
    pub id: SubscriptionId,

    /// User who owns this subscription.
    pub user_id: UserId,

    /// Billing status written by the payment collaborator.
    pub status: SubscriptionStatus,

    /// Whether the user has requested cancellation at period end.
    pub cancel_at_period_end: bool,

    /// End of the currently paid period, when known.
    pub end_date: Option<Timestamp>,

    /// Next scheduled billing date, when known.
    pub next_billing_date: Option<Timestamp>,

    /// Display name of the purchased plan.
    pub plan_name: String,

    /// Price paid, in cents.
    pub amount_cents: i64,

    /// ISO currency code for the amount.
    pub currency: String,

    /// When the subscription record was created.
    pub created_at: Timestamp,

    /// When the subscription record was last updated.
    pub updated_at: Timestamp,
}

impl SubscriptionRecord {
    /// Create an active subscription from a confirmed payment.
    pub fn create_active(
        id: SubscriptionId,
        user_id: UserId,
        plan_name: String,
        amount_cents: i64,
        currency: String,
        end_date: Option<Timestamp>,
        next_billing_date: Option<Timestamp>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            status: SubscriptionStatus::Active,
            cancel_at_period_end: false,
            end_date,
            next_billing_date,
            plan_name,
            amount_cents,
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this subscription actually grants access right now.
    ///
    /// Active status alone is not enough once cancellation has been
    /// requested: access then lasts only while the paid period or the next
    /// billing date lies ahead. A date the collaborator never supplied
    /// contributes nothing to the grace period.
    pub fn is_actually_active(&self, now: Timestamp) -> bool {
        if self.status != SubscriptionStatus::Active {
            return false;
        }
        if !self.cancel_at_period_end {
            return true;
        }

        let before_period_end = self
            .end_date
            .map(|end| now.is_before(&end))
            .unwrap_or(false);
        let before_next_billing = self
            .next_billing_date
            .map(|next| now.is_before(&next))
            .unwrap_or(false);
        before_period_end || before_next_billing
    }

    /// Record a cancellation request, effective at period end.
    ///
    /// Status stays untouched; only the payment collaborator moves it once
    /// the period actually lapses.
    pub fn request_cancellation(&mut self, now: Timestamp) {
        self.cancel_at_period_end = true;
        self.updated_at = now;
    }
}
