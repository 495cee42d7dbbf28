//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `LEARNLOOP_` prefix and nested values use underscores as separators.
//!
//! # Example
//!
//! Assembling the engine from configuration:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use learnloop::adapters::cache;
//! use learnloop::adapters::postgres::{
//!     connect_pool, PostgresSubscriptionTable, PostgresTrialTable,
//! };
//! use learnloop::application::{
//!     EntitlementResolver, SubscriptionStatusResolver, TrialLifecycleManager,
//! };
//! use learnloop::config::AppConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! config.validate()?;
//!
//! let pool = connect_pool(&config.database)?;
//! let cache = cache::from_config(&config.cache).await?;
//!
//! let subscriptions = Arc::new(SubscriptionStatusResolver::new(
//!     Arc::new(PostgresSubscriptionTable::new(pool.clone())),
//!     cache.clone(),
//! ));
//! let trials = Arc::new(TrialLifecycleManager::new(
//!     Arc::new(PostgresTrialTable::new(pool)),
//!     cache,
//!     config.trial.total_days,
//! ));
//! let resolver = EntitlementResolver::new(subscriptions, trials);
//! # let _ = resolver;
//! # Ok(())
//! # }
//! ```

mod cache;
mod database;
mod error;
mod trial;

pub use cache::{CacheBackend, CacheConfig};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use trial::TrialConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the entitlement engine.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Remote store configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Cache configuration (fallback store selection)
    #[serde(default)]
    pub cache: CacheConfig,

    /// Trial lifecycle configuration
    #[serde(default)]
    pub trial: TrialConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LEARNLOOP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LEARNLOOP__DATABASE__URL=...` -> `database.url = ...`
    /// - `LEARNLOOP__TRIAL__TOTAL_DAYS=14` -> `trial.total_days = 14`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LEARNLOOP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.cache.validate()?;
        self.trial.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "LEARNLOOP__DATABASE__URL",
            "postgresql://test@localhost/learnloop",
        );
    }

    fn clear_env() {
        env::remove_var("LEARNLOOP__DATABASE__URL");
        env::remove_var("LEARNLOOP__TRIAL__TOTAL_DAYS");
        env::remove_var("LEARNLOOP__CACHE__BACKEND");
    }

    #[test]
    fn loads_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/learnloop");
    }

    #[test]
    fn minimal_environment_passes_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn trial_window_defaults_to_a_week() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.trial.total_days, 7);
    }

    #[test]
    fn trial_window_is_overridable() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("LEARNLOOP__TRIAL__TOTAL_DAYS", "30");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.trial.total_days, 30);
    }

    #[test]
    fn cache_backend_is_overridable() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("LEARNLOOP__CACHE__BACKEND", "memory");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.cache.backend, CacheBackend::Memory);
    }
}
