//! SubscriptionStatusResolver - decides whether a subscription is actually active.

use std::sync::Arc;

use crate::application::cache_keys;
use crate::application::dual_store::DualStore;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::subscription::SubscriptionRecord;
use crate::ports::{CacheStore, RemoteTable};

/// Outcome of a subscription resolution.
///
/// `record` is present only when the remote store answered; the cache
/// fallback knows the flag, not the row.
#[derive(Debug, Clone)]
pub struct SubscriptionAssessment {
    /// Whether an actually-active subscription was found.
    pub active: bool,

    /// The remote record the decision was computed from, when available.
    pub record: Option<SubscriptionRecord>,
}

/// Resolves subscription-active state, remote-first with cache fallback.
///
/// Every authoritative answer is written through to the cached boolean
/// flag, so a later check during a remote outage sees a consistent picture.
pub struct SubscriptionStatusResolver {
    store: DualStore<SubscriptionRecord>,
}

impl SubscriptionStatusResolver {
    pub fn new(
        remote: Arc<dyn RemoteTable<SubscriptionRecord>>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            store: DualStore::new(remote, cache, "subscriptions"),
        }
    }

    /// Resolve whether the user has an actually-active subscription.
    ///
    /// Never fails: a remote error degrades to the cached flag, and an
    /// empty cache degrades to the fail-closed `active=false`.
    pub async fn resolve(&self, user_id: &UserId) -> SubscriptionAssessment {
        let flag_key = cache_keys::subscription_active(user_id);

        match self.store.read_remote(user_id).await {
            Ok(Some(record)) => {
                // 1. Authoritative record: evaluate the grace-period rule
                let active = record.is_actually_active(Timestamp::now());

                // 2. Write through flag and metadata
                self.store.write_cache(&flag_key, &active).await;
                self.store
                    .write_cache(&cache_keys::subscription_meta(user_id), &record)
                    .await;

                SubscriptionAssessment {
                    active,
                    record: Some(record),
                }
            }
            Ok(None) => {
                // Authoritative "no active subscription": the flag must
                // follow, even if an older cached true is sitting there
                self.store.write_cache(&flag_key, &false).await;
                SubscriptionAssessment {
                    active: false,
                    record: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Subscription remote read failed, falling back to cached flag"
                );
                let active = self
                    .store
                    .read_cache::<bool>(&flag_key)
                    .await
                    .unwrap_or(false);
                SubscriptionAssessment {
                    active,
                    record: None,
                }
            }
        }
    }
}
