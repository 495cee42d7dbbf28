//! ConfirmSubscriptionHandler - Command handler for recording a confirmed payment.

use std::sync::Arc;

use crate::application::cache_keys;
use crate::application::dual_store::DualStore;
use crate::domain::foundation::{SubscriptionId, Timestamp, UserId, ValidationError};
use crate::domain::subscription::{BillingError, SubscriptionRecord};
use crate::ports::{CacheStore, RemoteTable};

/// Details of a payment the billing provider has confirmed.
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub user_id: UserId,
    /// Provider-side reference for the payment, kept for the audit log.
    pub reference: String,
    pub plan_name: String,
    pub amount_cents: i64,
    pub currency: String,
    pub period_end: Option<Timestamp>,
    pub next_billing_date: Option<Timestamp>,
}

/// Handler for recording a confirmed payment as an active subscription.
///
/// The cache is written before the remote store. The user has just paid, so
/// the very next entitlement check must see the subscription even when the
/// remote store happens to be down at that moment. The remote write is best
/// effort and reconciles the durable copy when it succeeds.
pub struct ConfirmSubscriptionHandler {
    store: DualStore<SubscriptionRecord>,
}

impl ConfirmSubscriptionHandler {
    pub fn new(
        remote: Arc<dyn RemoteTable<SubscriptionRecord>>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            store: DualStore::new(remote, cache, "subscriptions"),
        }
    }

    pub async fn handle(
        &self,
        confirmation: PaymentConfirmation,
    ) -> Result<SubscriptionRecord, BillingError> {
        // 1. Validate the confirmation details
        if confirmation.plan_name.trim().is_empty() {
            return Err(ValidationError::empty_field("plan_name").into());
        }
        if confirmation.currency.trim().is_empty() {
            return Err(ValidationError::empty_field("currency").into());
        }
        if confirmation.amount_cents < 0 {
            return Err(
                ValidationError::invalid_format("amount_cents", "must not be negative").into(),
            );
        }

        // 2. Build the active record
        let now = Timestamp::now();
        let record = SubscriptionRecord::create_active(
            SubscriptionId::new(),
            confirmation.user_id.clone(),
            confirmation.plan_name,
            confirmation.amount_cents,
            confirmation.currency,
            confirmation.period_end,
            confirmation.next_billing_date,
            now,
        );

        // 3. Cache first so the next entitlement check sees the payment
        self.store
            .write_cache(&cache_keys::subscription_active(&record.user_id), &true)
            .await;
        self.store
            .write_cache(&cache_keys::subscription_meta(&record.user_id), &record)
            .await;

        // 4. Remote write is best effort; the cache already answers
        self.store.write_remote_best_effort(&record).await;

        tracing::info!(
            user_id = %record.user_id,
            subscription_id = %record.id,
            reference = %confirmation.reference,
            plan = %record.plan_name,
            "Subscription confirmed"
        );

        Ok(record)
    }
}
