//! RequestCancellationHandler - Command handler for end-of-period cancellation.

use std::sync::Arc;

use crate::application::cache_keys;
use crate::application::dual_store::DualStore;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::subscription::{BillingError, SubscriptionRecord};
use crate::ports::{CacheStore, RemoteTable};

/// Command to stop a subscription from renewing.
#[derive(Debug, Clone)]
pub struct CancellationRequest {
    pub user_id: UserId,
}

/// Handler for scheduling a subscription cancellation at period end.
///
/// Cancellation never revokes access on the spot. It flips the renewal flag
/// and leaves the paid period intact; the grace rule on the record decides
/// when access actually lapses.
pub struct RequestCancellationHandler {
    store: DualStore<SubscriptionRecord>,
}

impl RequestCancellationHandler {
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
        request: CancellationRequest,
    ) -> Result<SubscriptionRecord, BillingError> {
        // 1. Load the subscription, falling back to the cached copy. A
        //    payment confirmed during an outage exists only in the cache.
        let meta_key = cache_keys::subscription_meta(&request.user_id);
        let mut record = match self.store.read_remote(&request.user_id).await {
            Ok(Some(record)) => record,
            Ok(None) => match self
                .store
                .read_cache::<SubscriptionRecord>(&meta_key)
                .await
            {
                Some(cached) => cached,
                None => return Err(BillingError::no_active_subscription(request.user_id)),
            },
            Err(error) => {
                tracing::warn!(
                    user_id = %request.user_id,
                    error = %error,
                    "Remote store unavailable, cancelling against cached subscription"
                );
                match self
                    .store
                    .read_cache::<SubscriptionRecord>(&meta_key)
                    .await
                {
                    Some(cached) => cached,
                    None => return Err(BillingError::no_active_subscription(request.user_id)),
                }
            }
        };

        // 2. Flip the renewal flag; the paid period stays intact
        let now = Timestamp::now();
        record.request_cancellation(now);

        // 3. Persist, then resync both cache entries
        self.store.write_remote_best_effort(&record).await;
        self.store.write_cache(&meta_key, &record).await;
        self.store
            .write_cache(
                &cache_keys::subscription_active(&request.user_id),
                &record.is_actually_active(now),
            )
            .await;

        tracing::info!(
            user_id = %record.user_id,
            subscription_id = %record.id,
            "Cancellation scheduled for period end"
        );

        Ok(record)
    }
}
