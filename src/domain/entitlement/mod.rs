//! Entitlement domain module.
//!
//! The derived access decision: granted or denied, and which layer
//! (subscription, trial, nothing) justified it.

mod status;

pub use status::{EntitlementSource, EntitlementStatus};
