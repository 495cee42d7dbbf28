//! Cache configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Which cache backend serves as the local fallback store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Process memory, lost on restart
    Memory,
    /// One file per entry under `file_path`
    File,
    /// Shared Redis instance under `namespace`
    Redis,
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_backend")]
    pub backend: CacheBackend,

    /// Directory for the file backend
    #[serde(default = "default_file_path")]
    pub file_path: String,

    /// Connection URL for the Redis backend
    #[serde(default)]
    pub redis_url: String,

    /// Key prefix for the Redis backend
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl CacheConfig {
    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.backend {
            CacheBackend::Memory => Ok(()),
            CacheBackend::File => {
                if self.file_path.is_empty() {
                    return Err(ValidationError::MissingRequired("CACHE_FILE_PATH"));
                }
                Ok(())
            }
            CacheBackend::Redis => {
                if self.redis_url.is_empty() {
                    return Err(ValidationError::MissingRequired("CACHE_REDIS_URL"));
                }
                if !self.redis_url.starts_with("redis://")
                    && !self.redis_url.starts_with("rediss://")
                {
                    return Err(ValidationError::InvalidRedisUrl);
                }
                Ok(())
            }
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            file_path: default_file_path(),
            redis_url: String::new(),
            namespace: default_namespace(),
        }
    }
}

fn default_backend() -> CacheBackend {
    CacheBackend::File
}

fn default_file_path() -> String {
    "./data/entitlement_cache".to_string()
}

fn default_namespace() -> String {
    "learnloop".to_string()
}
