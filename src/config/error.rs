//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid sink endpoint URL")]
    InvalidEndpoint,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Batch size must be at least 1")]
    InvalidBatchSize,

    #[error("Flush interval must be at least 100ms")]
    InvalidFlushInterval,

    #[error("Retry policy must allow at least one attempt")]
    InvalidRetryPolicy,

    #[error("History limit must be at least 1")]
    InvalidHistoryLimit,

    #[error("Retention limit must be at least 1")]
    InvalidRetentionLimit,
}
