//! Subscription domain module.
//!
//! Records paid access as reported by the payment collaborator and the
//! grace-period rule that decides whether a record actually grants access.
//!
//! # Module Structure
//!
//! - `record` - SubscriptionRecord entity
//! - `status` - SubscriptionStatus values
//! - `errors` - Billing operation errors

mod record;
mod status;
mod errors;

pub use record::SubscriptionRecord;
pub use status::SubscriptionStatus;
pub use errors::BillingError;
