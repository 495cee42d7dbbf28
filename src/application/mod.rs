//! Application layer - entitlement resolution, lifecycle managers, and handlers.
//!
//! This layer composes the remote store and cache ports into
//! degradation-aware operations. Reads fall back to the cache when the
//! remote store misbehaves; writes that must not block the user are applied
//! cache-first with a best effort remote reconciliation.

mod cache_keys;
mod dual_store;

pub mod entitlement_resolver;
pub mod handlers;
pub mod subscription_resolver;
pub mod trial_manager;

pub use entitlement_resolver::EntitlementResolver;
pub use handlers::{
    CancellationRequest, ConfirmSubscriptionHandler, PaymentConfirmation,
    RequestCancellationHandler,
};
pub use subscription_resolver::{SubscriptionAssessment, SubscriptionStatusResolver};
pub use trial_manager::TrialLifecycleManager;
