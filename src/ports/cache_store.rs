//! Cache Store Port - Interface to the per-device key/value cache.
//!
//! The cache is non-authoritative and its operations never fail: it is the
//! last line of defense for instant feedback when the remote store is
//! unreachable. Adapters downgrade their own I/O errors to misses and
//! no-ops, logging at warn level.

use async_trait::async_trait;

/// Port for the local key/value cache with string values.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a cached value.
    ///
    /// Returns `None` on a miss, and on any adapter-internal failure.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a value, replacing any previous one.
    async fn put(&self, key: &str, value: String);

    /// Remove a cached value. Removing an absent key is a no-op.
    async fn remove(&self, key: &str);
}
