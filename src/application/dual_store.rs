//! DualStore - paired access to the remote store and the local cache.
//!
//! One instance per record family (trials, subscriptions). The remote side
//! is authoritative and fallible; the cache side never fails and holds
//! JSON-serialized values. Fallback precedence is decided by the callers,
//! which keeps exactly one copy of the "try remote, fall back to cache"
//! rule per component instead of one per call site.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::foundation::UserId;
use crate::ports::{CacheStore, RemoteStoreError, RemoteTable};

/// Read/write primitives over one remote table and the shared cache.
pub struct DualStore<R> {
    remote: Arc<dyn RemoteTable<R>>,
    cache: Arc<dyn CacheStore>,
    table: &'static str,
}

impl<R> DualStore<R>
where
    R: Send + Sync,
{
    pub fn new(
        remote: Arc<dyn RemoteTable<R>>,
        cache: Arc<dyn CacheStore>,
        table: &'static str,
    ) -> Self {
        Self {
            remote,
            cache,
            table,
        }
    }

    /// Single-attempt authoritative read.
    ///
    /// `Ok(None)` means the store answered and holds no record. Errors are
    /// classified by the adapter and never retried here.
    pub async fn read_remote(&self, user_id: &UserId) -> Result<Option<R>, RemoteStoreError> {
        self.remote.fetch_latest(user_id).await
    }

    /// Remote write that cannot fail the caller.
    ///
    /// A failure is logged and swallowed; the record keeps living in the
    /// cache until a later user-triggered operation writes it again.
    pub async fn write_remote_best_effort(&self, record: &R) {
        if let Err(e) = self.remote.upsert(record).await {
            tracing::warn!(
                table = self.table,
                error = %e,
                "Remote write failed, record persisted to cache only"
            );
        }
    }

    /// Read and JSON-decode a cached value.
    ///
    /// A payload that fails to parse is treated as a cache miss and the
    /// corrupt entry is dropped so it cannot fail again.
    pub async fn read_cache<V>(&self, key: &str) -> Option<V>
    where
        V: DeserializeOwned,
    {
        let raw = self.cache.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    key,
                    error = %e,
                    "Dropping cache entry that failed to parse"
                );
                self.cache.remove(key).await;
                None
            }
        }
    }

    /// JSON-encode and store a cache value.
    pub async fn write_cache<V>(&self, key: &str, value: &V)
    where
        V: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(raw) => self.cache.put(key, raw).await,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize cache value");
            }
        }
    }

    /// Drop a cache entry.
    pub async fn clear_cache(&self, key: &str) {
        self.cache.remove(key).await;
    }
}
