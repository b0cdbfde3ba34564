//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PRAXIS_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use praxis_analytics::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Shipping metrics to {}", config.sink.endpoint);
//! ```

mod dispatcher;
mod error;
mod sink;
mod storage;
mod tracking;

pub use dispatcher::DispatcherSettings;
pub use error::{ConfigError, ValidationError};
pub use sink::SinkConfig;
pub use storage::StorageConfig;
pub use tracking::TrackingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the analytics engine.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Remote sink configuration (endpoint, token, timeout)
    #[serde(default)]
    pub sink: SinkConfig,

    /// Batch dispatcher configuration (batch size, flush interval, retries)
    #[serde(default)]
    pub dispatcher: DispatcherSettings,

    /// Session tracking configuration (idle threshold, history cap)
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Durable backlog storage configuration (directory, retention cap)
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PRAXIS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PRAXIS__SINK__ENDPOINT=https://...` -> `sink.endpoint = https://...`
    /// - `PRAXIS__DISPATCHER__BATCH_SIZE=20` -> `dispatcher.batch_size = 20`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PRAXIS")
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
        self.sink.validate()?;
        self.dispatcher.validate()?;
        self.tracking.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}
