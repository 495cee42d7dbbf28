//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `trial` - Time-boxed free trial window and lifecycle
//! - `subscription` - Paid subscription records and the grace-period rule
//! - `entitlement` - The derived access decision

pub mod entitlement;
pub mod foundation;
pub mod subscription;
pub mod trial;
