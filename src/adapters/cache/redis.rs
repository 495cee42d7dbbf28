//! Redis-backed cache adapter for multi-instance deployments.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::ports::CacheStore;

/// Redis-backed implementation of `CacheStore`.
///
/// Entries live under a namespace prefix so one Redis instance can serve
/// several environments. Entries carry no TTL; the fallback state must
/// outlive arbitrarily long remote outages. Every failure degrades to a
/// miss or a dropped write.
#[derive(Clone)]
pub struct RedisCacheStore {
    conn: MultiplexedConnection,
    namespace: String,
}

impl RedisCacheStore {
    /// Create a new Redis cache under `namespace`.
    pub fn new(conn: MultiplexedConnection, namespace: impl Into<String>) -> Self {
        Self {
            conn,
            namespace: namespace.into(),
        }
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(self.namespaced(key)).await {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(key = %key, error = %error, "Cache read failed, treating as miss");
                None
            }
        }
    }

    async fn put(&self, key: &str, value: String) {
        let mut conn = self.conn.clone();
        if let Err(error) = conn.set::<_, _, ()>(self.namespaced(key), value).await {
            tracing::warn!(key = %key, error = %error, "Cache write failed, entry dropped");
        }
    }

    async fn remove(&self, key: &str) {
        let mut conn = self.conn.clone();
        if let Err(error) = conn.del::<_, ()>(self.namespaced(key)).await {
            tracing::warn!(key = %key, error = %error, "Cache invalidation failed");
        }
    }
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
