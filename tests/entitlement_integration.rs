//! Integration tests for entitlement resolution and the trial lifecycle.
//!
//! These tests verify the end-to-end flow:
//! 1. Entitlement checks combine subscription and trial state
//! 2. Trials are granted lazily on the first eligible check
//! 3. Payment confirmation and cancellation move users between sources
//! 4. Remote outages degrade every read to the cache without denying access
//!
//! Uses the in-memory adapters to run the engine without external dependencies.

use std::sync::Arc;

use learnloop::adapters::cache;
use learnloop::adapters::{InMemorySubscriptionTable, InMemoryTrialTable};
use learnloop::application::{
    CancellationRequest, ConfirmSubscriptionHandler, EntitlementResolver, PaymentConfirmation,
    RequestCancellationHandler, SubscriptionStatusResolver, TrialLifecycleManager,
};
use learnloop::config::{AppConfig, CacheBackend, CacheConfig, DatabaseConfig, TrialConfig};
use learnloop::domain::entitlement::EntitlementSource;
use learnloop::domain::foundation::{Timestamp, TrialId, UserId};
use learnloop::domain::trial::TrialRecord;
use learnloop::ports::RemoteTable;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Fixture {
    trial_table: InMemoryTrialTable,
    subscription_table: InMemorySubscriptionTable,
    resolver: EntitlementResolver,
    trials: Arc<TrialLifecycleManager>,
    confirm: ConfirmSubscriptionHandler,
    cancel: RequestCancellationHandler,
}

/// Route engine logs through the test harness when RUST_LOG is set.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Configuration the fixture runs under: memory cache, week-long trials.
fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: "postgresql://learnloop@localhost/learnloop".to_string(),
            ..Default::default()
        },
        cache: CacheConfig {
            backend: CacheBackend::Memory,
            ..Default::default()
        },
        trial: TrialConfig::default(),
    }
}

/// Wire the engine exactly as production does, from the configuration
/// down, over the in-memory remote tables. The table handles kept on the
/// fixture share state with the engine.
async fn fixture() -> Fixture {
    init_tracing();
    let config = test_config();
    config.validate().unwrap();

    let trial_table = InMemoryTrialTable::new();
    let subscription_table = InMemorySubscriptionTable::new();
    let cache = cache::from_config(&config.cache).await.unwrap();

    let subscriptions = Arc::new(SubscriptionStatusResolver::new(
        Arc::new(subscription_table.clone()),
        cache.clone(),
    ));
    let trials = Arc::new(TrialLifecycleManager::new(
        Arc::new(trial_table.clone()),
        cache.clone(),
        config.trial.total_days,
    ));
    let resolver = EntitlementResolver::new(subscriptions, trials.clone());
    let confirm =
        ConfirmSubscriptionHandler::new(Arc::new(subscription_table.clone()), cache.clone());
    let cancel = RequestCancellationHandler::new(Arc::new(subscription_table.clone()), cache);

    Fixture {
        trial_table,
        subscription_table,
        resolver,
        trials,
        confirm,
        cancel,
    }
}

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

fn confirmation(user_id: &UserId, period_end: Timestamp) -> PaymentConfirmation {
    PaymentConfirmation {
        user_id: user_id.clone(),
        reference: "pay_test".to_string(),
        plan_name: "Monthly".to_string(),
        amount_cents: 1_500,
        currency: "USD".to_string(),
        period_end: Some(period_end),
        next_billing_date: Some(period_end),
    }
}

// =============================================================================
// Trial Lifecycle
// =============================================================================

/// A brand new user's first entitlement check grants a full trial and
/// persists it to the remote store.
#[tokio::test]
async fn first_check_grants_a_full_trial() {
    let fx = fixture().await;
    let user_id = user("fresh-user");

    let status = fx
        .resolver
        .get_entitlement(&user_id, Some(Timestamp::now()))
        .await;

    assert!(status.has_access);
    assert_eq!(status.source, EntitlementSource::Trial);
    assert_eq!(status.days_remaining_if_trial, Some(7));
    assert_eq!(fx.trial_table.row_count().await, 1);
}

/// Checking twice grants one trial; the second check reuses the first.
#[tokio::test]
async fn repeated_checks_never_grant_a_second_trial() {
    let fx = fixture().await;
    let user_id = user("steady-user");
    let now = Timestamp::now();

    let first = fx.resolver.get_entitlement(&user_id, Some(now)).await;
    let second = fx.resolver.get_entitlement(&user_id, Some(now)).await;

    assert_eq!(first, second);
    assert_eq!(fx.trial_table.row_count().await, 1);
}

/// An account past the trial window on its first check gets nothing.
#[tokio::test]
async fn old_account_without_history_is_denied() {
    let fx = fixture().await;
    let user_id = user("late-arrival");

    let created = Timestamp::now().minus_days(30);
    let status = fx.resolver.get_entitlement(&user_id, Some(created)).await;

    assert!(!status.has_access);
    assert_eq!(status.source, EntitlementSource::None);
    assert_eq!(fx.trial_table.row_count().await, 0);
}

/// Extending a live trial is visible on the next check.
#[tokio::test]
async fn extension_adds_days_to_the_countdown() {
    let fx = fixture().await;
    let user_id = user("extended-user");
    let now = Timestamp::now();

    fx.resolver.get_entitlement(&user_id, Some(now)).await;
    fx.trials.extend(&user_id, 7).await.unwrap();

    let status = fx.resolver.get_entitlement(&user_id, Some(now)).await;
    assert_eq!(status.days_remaining_if_trial, Some(14));
}

/// Terminating a trial revokes access and stays revoked; the user is not
/// re-granted on the next check.
#[tokio::test]
async fn terminated_trial_stays_terminated() {
    let fx = fixture().await;
    let user_id = user("revoked-user");
    let now = Timestamp::now();

    fx.resolver.get_entitlement(&user_id, Some(now)).await;
    fx.trials.terminate(&user_id).await.unwrap();

    let status = fx.resolver.get_entitlement(&user_id, Some(now)).await;
    assert!(!status.has_access);
    assert_eq!(status.source, EntitlementSource::None);
    assert_eq!(fx.trial_table.row_count().await, 1);
}

/// A trial that ran out of days denies access without a subscription.
#[tokio::test]
async fn exhausted_trial_is_denied() {
    let fx = fixture().await;
    let user_id = user("exhausted-user");

    let anchor = Timestamp::now().minus_days(20);
    let lapsed = TrialRecord::create(TrialId::new(), user_id.clone(), anchor, 7, anchor);
    fx.trial_table.upsert(&lapsed).await.unwrap();

    let status = fx.resolver.get_entitlement(&user_id, None).await;
    assert!(!status.has_access);
    assert_eq!(status.source, EntitlementSource::None);
}

// =============================================================================
// Billing Lifecycle
// =============================================================================

/// Paying during a trial switches the entitlement source to the
/// subscription.
#[tokio::test]
async fn payment_promotes_a_trial_user_to_subscriber() {
    let fx = fixture().await;
    let user_id = user("upgrader");
    let now = Timestamp::now();

    let before = fx.resolver.get_entitlement(&user_id, Some(now)).await;
    assert_eq!(before.source, EntitlementSource::Trial);

    fx.confirm
        .handle(confirmation(&user_id, now.add_days(30)))
        .await
        .unwrap();

    let after = fx.resolver.get_entitlement(&user_id, Some(now)).await;
    assert!(after.has_access);
    assert_eq!(after.source, EntitlementSource::Subscription);
    assert!(after.days_remaining_if_trial.is_none());
}

/// Paying after the trial lapsed restores access.
#[tokio::test]
async fn payment_restores_access_after_trial_expiry() {
    let fx = fixture().await;
    let user_id = user("returning-user");
    let now = Timestamp::now();

    let anchor = now.minus_days(20);
    let lapsed = TrialRecord::create(TrialId::new(), user_id.clone(), anchor, 7, anchor);
    fx.trial_table.upsert(&lapsed).await.unwrap();

    assert!(!fx.resolver.get_entitlement(&user_id, None).await.has_access);

    fx.confirm
        .handle(confirmation(&user_id, now.add_days(30)))
        .await
        .unwrap();

    let status = fx.resolver.get_entitlement(&user_id, None).await;
    assert_eq!(status.source, EntitlementSource::Subscription);
}

/// Cancellation schedules the stop but the paid period keeps granting
/// access.
#[tokio::test]
async fn cancellation_keeps_access_through_the_paid_period() {
    let fx = fixture().await;
    let user_id = user("leaver");
    let now = Timestamp::now();

    fx.confirm
        .handle(confirmation(&user_id, now.add_days(30)))
        .await
        .unwrap();
    let record = fx
        .cancel
        .handle(CancellationRequest {
            user_id: user_id.clone(),
        })
        .await
        .unwrap();
    assert!(record.cancel_at_period_end);

    let status = fx.resolver.get_entitlement(&user_id, None).await;
    assert!(status.has_access);
    assert_eq!(status.source, EntitlementSource::Subscription);
}

/// Once the cancelled period lapses, access is gone for good.
#[tokio::test]
async fn cancelled_subscription_lapses_at_period_end() {
    let fx = fixture().await;
    let user_id = user("lapsed-leaver");
    let now = Timestamp::now();

    // Period ended two days ago
    fx.confirm
        .handle(confirmation(&user_id, now.minus_days(2)))
        .await
        .unwrap();
    fx.cancel
        .handle(CancellationRequest {
            user_id: user_id.clone(),
        })
        .await
        .unwrap();

    let created = now.minus_days(60);
    let status = fx.resolver.get_entitlement(&user_id, Some(created)).await;
    assert!(!status.has_access);
    assert_eq!(status.source, EntitlementSource::None);
}

// =============================================================================
// Outage Degradation
// =============================================================================

/// A subscriber keeps access while the remote store is down because the
/// cached flag answers for it.
#[tokio::test]
async fn subscriber_keeps_access_through_an_outage() {
    let fx = fixture().await;
    let user_id = user("paying-user");
    let now = Timestamp::now();

    fx.confirm
        .handle(confirmation(&user_id, now.add_days(30)))
        .await
        .unwrap();

    fx.subscription_table.set_available(false);
    fx.trial_table.set_available(false);

    let status = fx.resolver.get_entitlement(&user_id, None).await;
    assert!(status.has_access);
    assert_eq!(status.source, EntitlementSource::Subscription);
}

/// A trial user keeps the countdown through an outage, served from the
/// cached record.
#[tokio::test]
async fn trial_countdown_survives_an_outage() {
    let fx = fixture().await;
    let user_id = user("trial-user");

    // Four days into the window, two full days left after today
    let anchor = Timestamp::now().minus_days(4);
    let trial = TrialRecord::create(TrialId::new(), user_id.clone(), anchor, 7, anchor);
    fx.trial_table.upsert(&trial).await.unwrap();

    let healthy = fx.resolver.get_entitlement(&user_id, None).await;
    assert_eq!(healthy.days_remaining_if_trial, Some(2));

    fx.subscription_table.set_available(false);
    fx.trial_table.set_available(false);

    let degraded = fx.resolver.get_entitlement(&user_id, None).await;
    assert_eq!(degraded, healthy);
}

/// A new user during a full outage still gets a trial, living only in the
/// cache until the store comes back.
#[tokio::test]
async fn new_user_during_outage_gets_a_cache_only_trial() {
    let fx = fixture().await;
    let user_id = user("unlucky-newcomer");
    let now = Timestamp::now();

    fx.subscription_table.set_available(false);
    fx.trial_table.set_available(false);

    let status = fx.resolver.get_entitlement(&user_id, Some(now)).await;
    assert!(status.has_access);
    assert_eq!(status.source, EntitlementSource::Trial);
    assert_eq!(status.days_remaining_if_trial, Some(7));
    // The grant never reached the dead remote, so it lives in cache only
    assert_eq!(fx.trial_table.row_count().await, 0);

    // The store heals with no row for this user; the cached trial still
    // answers and no duplicate grant happens
    fx.subscription_table.set_available(true);
    fx.trial_table.set_available(true);

    let after = fx.resolver.get_entitlement(&user_id, Some(now)).await;
    assert_eq!(after, status);
    assert_eq!(fx.trial_table.row_count().await, 0);
}

/// A payment that lands during an outage grants access immediately and can
/// even be cancelled before the store recovers.
#[tokio::test]
async fn payment_during_outage_grants_immediate_access() {
    let fx = fixture().await;
    let user_id = user("determined-payer");
    let now = Timestamp::now();

    fx.subscription_table.set_available(false);
    fx.trial_table.set_available(false);

    fx.confirm
        .handle(confirmation(&user_id, now.add_days(30)))
        .await
        .unwrap();

    let status = fx.resolver.get_entitlement(&user_id, None).await;
    assert!(status.has_access);
    assert_eq!(status.source, EntitlementSource::Subscription);

    // Cancellation against the cached copy still works
    let record = fx
        .cancel
        .handle(CancellationRequest {
            user_id: user_id.clone(),
        })
        .await
        .unwrap();
    assert!(record.cancel_at_period_end);

    let still = fx.resolver.get_entitlement(&user_id, None).await;
    assert!(still.has_access);
}

/// With nothing cached and the store down, the engine fails closed.
#[tokio::test]
async fn unknown_user_during_outage_is_denied() {
    let fx = fixture().await;
    let user_id = user("stranger");

    fx.subscription_table.set_available(false);
    fx.trial_table.set_available(false);

    let created = Timestamp::now().minus_days(30);
    let status = fx.resolver.get_entitlement(&user_id, Some(created)).await;

    assert!(!status.has_access);
    assert_eq!(status.source, EntitlementSource::None);
}
