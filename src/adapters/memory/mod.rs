//! In-memory remote tables - development and test doubles for the
//! PostgreSQL adapters, with an availability switch for staging outages.

mod subscription_table;
mod trial_table;

pub use subscription_table::InMemorySubscriptionTable;
pub use trial_table::InMemoryTrialTable;
