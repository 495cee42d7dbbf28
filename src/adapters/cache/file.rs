//! File-based Cache Adapter
//!
//! Persists cache entries as one file per key under a base directory, so
//! the fallback state survives process restarts. Suited to single-instance
//! deployments such as a desktop or classroom install.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::CacheStore;

/// File-based implementation of `CacheStore`.
///
/// Every failure degrades to a miss or a dropped write; the cache port
/// carries no errors.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    base_path: PathBuf,
}

impl FileCacheStore {
    /// Create a new file cache rooted at `base_path`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// File path for a key. Bytes outside [A-Za-z0-9-] become `_` plus two
    /// hex digits, so distinct keys keep distinct files and none escapes
    /// the base directory.
    fn entry_path(&self, key: &str) -> PathBuf {
        let mut file_name = String::with_capacity(key.len());
        for byte in key.bytes() {
            match byte {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' => file_name.push(byte as char),
                other => file_name.push_str(&format!("_{:02x}", other)),
            }
        }
        self.base_path.join(file_name)
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path).await {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    async fn put(&self, key: &str, value: String) {
        if let Err(e) = fs::create_dir_all(&self.base_path).await {
            tracing::warn!(error = %e, "Cache directory unavailable, write dropped");
            return;
        }
        let path = self.entry_path(key);
        if let Err(e) = fs::write(&path, value).await {
            tracing::warn!(key = %key, error = %e, "Cache write failed, entry dropped");
        }
    }

    async fn remove(&self, key: &str) {
        let path = self.entry_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache invalidation failed");
            }
        }
    }
}
