//! Cache adapters - local fallback storage implementations.
//!
//! - `InMemoryCacheStore` - process-local, for tests and development
//! - `FileCacheStore` - survives restarts, for single-instance installs
//! - `RedisCacheStore` - shared, for multi-instance deployments
//!
//! `from_config` picks among the three from the cache configuration.

mod factory;
mod file;
mod in_memory;
mod redis;

pub use factory::from_config;
pub use file::FileCacheStore;
pub use in_memory::InMemoryCacheStore;
pub use redis::RedisCacheStore;
