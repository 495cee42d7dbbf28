//! Billing handlers.
//!
//! Command handlers for the subscription billing lifecycle:
//!
//! - Recording confirmed payments as active subscriptions
//! - Scheduling cancellations at period end
//!
//! Both handlers treat the remote store as best effort. A user who just paid
//! is never made to wait on, or fail because of, a struggling database.

mod confirm_subscription;
mod request_cancellation;

pub use confirm_subscription::{ConfirmSubscriptionHandler, PaymentConfirmation};
pub use request_cancellation::{CancellationRequest, RequestCancellationHandler};
