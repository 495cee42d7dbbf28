//! In-Memory Cache Adapter
//!
//! Stores cache entries in process memory.
//! Useful for testing and single-instance development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::CacheStore;

/// In-memory implementation of `CacheStore`.
#[derive(Debug, Clone)]
pub struct InMemoryCacheStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCacheStore {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of live entries (useful for tests)
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    async fn put(&self, key: &str, value: String) {
        self.entries.write().await.insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_entries() {
        let cache = InMemoryCacheStore::new();

        cache.put("trial_status:u1", "{}".to_string()).await;

        assert_eq!(cache.get("trial_status:u1").await.as_deref(), Some("{}"));
        assert_eq!(cache.entry_count().await, 1);
    }

    #[tokio::test]
    async fn missing_key_is_a_miss() {
        let cache = InMemoryCacheStore::new();
        assert!(cache.get("absent").await.is_none());
    }

    #[tokio::test]
    async fn put_overwrites_existing_entry() {
        let cache = InMemoryCacheStore::new();

        cache.put("flag", "true".to_string()).await;
        cache.put("flag", "false".to_string()).await;

        assert_eq!(cache.get("flag").await.as_deref(), Some("false"));
    }

    #[tokio::test]
    async fn remove_drops_the_entry() {
        let cache = InMemoryCacheStore::new();

        cache.put("flag", "true".to_string()).await;
        cache.remove("flag").await;

        assert!(cache.get("flag").await.is_none());
    }

    #[tokio::test]
    async fn clones_share_the_same_entries() {
        let cache = InMemoryCacheStore::new();
        let handle = cache.clone();

        cache.put("flag", "true".to_string()).await;

        assert_eq!(handle.get("flag").await.as_deref(), Some("true"));
    }
}
