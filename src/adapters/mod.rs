//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Remote store tables backed by PostgreSQL
//! - `cache` - Local fallback caches (in-memory, file, Redis)
//! - `memory` - In-memory remote tables for tests and development

pub mod cache;
pub mod memory;
pub mod postgres;

pub use cache::{FileCacheStore, InMemoryCacheStore, RedisCacheStore};
pub use memory::{InMemorySubscriptionTable, InMemoryTrialTable};
pub use postgres::{PostgresSubscriptionTable, PostgresTrialTable};
