//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `RemoteTable` - Authoritative remote row store, one table per record family
//! - `CacheStore` - Non-authoritative per-device key/value cache

mod remote_store;
mod cache_store;

pub use remote_store::{RemoteStoreError, RemoteTable};
pub use cache_store::CacheStore;
