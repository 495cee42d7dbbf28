//! Configuration-driven cache backend selection.

use std::sync::Arc;

use redis::Client;

use crate::config::{CacheBackend, CacheConfig};
use crate::ports::CacheStore;

use super::{FileCacheStore, InMemoryCacheStore, RedisCacheStore};

/// Build the configured cache backend.
///
/// # Errors
///
/// Fails only for the Redis backend, when the configured instance cannot
/// be reached. The memory and file backends always construct.
pub async fn from_config(config: &CacheConfig) -> Result<Arc<dyn CacheStore>, redis::RedisError> {
    match config.backend {
        CacheBackend::Memory => Ok(Arc::new(InMemoryCacheStore::new())),
        CacheBackend::File => Ok(Arc::new(FileCacheStore::new(&config.file_path))),
        CacheBackend::Redis => {
            tracing::info!(namespace = %config.namespace, "Connecting to Redis cache");
            let client = Client::open(config.redis_url.as_str())?;
            let conn = client.get_multiplexed_tokio_connection().await?;
            Ok(Arc::new(RedisCacheStore::new(conn, config.namespace.clone())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn memory_backend_serves_round_trips() {
        let config = CacheConfig {
            backend: CacheBackend::Memory,
            ..Default::default()
        };

        let cache = from_config(&config).await.unwrap();
        cache.put("flag", "true".to_string()).await;

        assert_eq!(cache.get("flag").await.as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn file_backend_writes_under_the_configured_path() {
        let temp_dir = TempDir::new().unwrap();
        let config = CacheConfig {
            backend: CacheBackend::File,
            file_path: temp_dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        };

        let cache = from_config(&config).await.unwrap();
        cache.put("flag", "true".to_string()).await;

        assert!(temp_dir.path().join("flag").exists());
    }

    #[tokio::test]
    async fn unreachable_redis_is_an_error() {
        let config = CacheConfig {
            backend: CacheBackend::Redis,
            redis_url: "redis://127.0.0.1:1".to_string(),
            ..Default::default()
        };

        assert!(from_config(&config).await.is_err());
    }
}
