//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod billing;

pub use billing::{
    CancellationRequest, ConfirmSubscriptionHandler, PaymentConfirmation,
    RequestCancellationHandler,
};
