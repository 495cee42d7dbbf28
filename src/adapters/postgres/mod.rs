//! PostgreSQL adapters - remote store implementations for the entitlement tables.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresTrialTable` - trials, one row per user
//! - `PostgresSubscriptionTable` - subscriptions, newest active row per user
//! - `connect_pool` - pool construction from the database configuration

mod pool;
mod subscription_table;
mod trial_table;

pub use pool::connect_pool;
pub use subscription_table::PostgresSubscriptionTable;
pub use trial_table::PostgresTrialTable;
