//! EntitlementResolver - the single access decision.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use tokio::sync::Mutex;

use crate::application::subscription_resolver::SubscriptionStatusResolver;
use crate::application::trial_manager::TrialLifecycleManager;
use crate::domain::entitlement::EntitlementStatus;
use crate::domain::foundation::{Timestamp, UserId};

type SharedResolution = Shared<BoxFuture<'static, EntitlementStatus>>;

/// Combines subscription and trial state into one access decision.
///
/// Subscription strictly dominates trial; a canceled subscription still in
/// its grace period counts the same as a fully active one. Resolution never
/// fails: every internal error has already been degraded to a fallback by
/// the lower components, and the composite answer is fail-closed only when
/// no layer offers positive evidence of access.
///
/// Duplicate concurrent requests for one user coalesce onto a shared
/// in-flight resolution instead of hitting the stores twice. The guard is
/// owned by this instance; it does not span processes or devices.
pub struct EntitlementResolver {
    subscriptions: Arc<SubscriptionStatusResolver>,
    trials: Arc<TrialLifecycleManager>,
    in_flight: Arc<Mutex<HashMap<UserId, SharedResolution>>>,
}

impl EntitlementResolver {
    pub fn new(
        subscriptions: Arc<SubscriptionStatusResolver>,
        trials: Arc<TrialLifecycleManager>,
    ) -> Self {
        Self {
            subscriptions,
            trials,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Resolve whether the user currently has access, and through what.
    ///
    /// `account_created_at` feeds the lazy-grant eligibility check; pass
    /// `None` when the platform does not know the creation date.
    pub async fn get_entitlement(
        &self,
        user_id: &UserId,
        account_created_at: Option<Timestamp>,
    ) -> EntitlementStatus {
        let shared = {
            let mut in_flight = self.in_flight.lock().await;
            match in_flight.get(user_id) {
                Some(pending) => pending.clone(),
                None => {
                    let resolution = Self::start_resolution(
                        Arc::clone(&self.subscriptions),
                        Arc::clone(&self.trials),
                        Arc::clone(&self.in_flight),
                        user_id.clone(),
                        account_created_at,
                    );
                    in_flight.insert(user_id.clone(), resolution.clone());
                    resolution
                }
            }
        };

        shared.await
    }

    /// Build the shared resolution future for one user.
    ///
    /// The future removes its own guard entry just before completing, so a
    /// result is never served from the map after it is known. An abandoned
    /// resolution stays in the map un-polled; the next caller for the same
    /// user picks it up and drives it to completion.
    fn start_resolution(
        subscriptions: Arc<SubscriptionStatusResolver>,
        trials: Arc<TrialLifecycleManager>,
        in_flight: Arc<Mutex<HashMap<UserId, SharedResolution>>>,
        user_id: UserId,
        account_created_at: Option<Timestamp>,
    ) -> SharedResolution {
        async move {
            let status =
                Self::resolve_once(subscriptions, trials, &user_id, account_created_at).await;
            in_flight.lock().await.remove(&user_id);
            status
        }
        .boxed()
        .shared()
    }

    async fn resolve_once(
        subscriptions: Arc<SubscriptionStatusResolver>,
        trials: Arc<TrialLifecycleManager>,
        user_id: &UserId,
        account_created_at: Option<Timestamp>,
    ) -> EntitlementStatus {
        // 1. Subscription always dominates
        let assessment = subscriptions.resolve(user_id).await;
        let status = if assessment.active {
            // Drop any stale trial entry so the UI never shows a trial
            // banner to an active subscriber
            trials.clear_cached_status(user_id).await;
            EntitlementStatus::subscription()
        } else {
            // 2. Trial, granted lazily on the first eligible check
            let trial = match trials.get_status(user_id).await {
                Some(existing) => Some(existing),
                None => trials.initialize(user_id, account_created_at).await,
            };

            // 3. A live trial grants access; anything else fails closed
            let now = Timestamp::now();
            match trial {
                Some(record) if record.grants_access(now) => {
                    EntitlementStatus::trial(record.days_remaining(now))
                }
                _ => EntitlementStatus::none(),
            }
        };

        tracing::debug!(
            user_id = %user_id,
            source = %status.source,
            has_access = status.has_access,
            "Entitlement resolved"
        );
        status
    }
}
