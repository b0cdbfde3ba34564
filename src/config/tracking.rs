//! Session tracking configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Session and history tracking configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    /// Activity gap in milliseconds classified as idle time
    #[serde(default = "default_idle_threshold")]
    pub idle_threshold_ms: u64,

    /// How many recent metrics to retain for session and report queries
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl TrackingConfig {
    /// Validate tracking configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_limit == 0 {
            return Err(ValidationError::InvalidHistoryLimit);
        }
        Ok(())
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            idle_threshold_ms: default_idle_threshold(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_idle_threshold() -> u64 {
    30_000
}

fn default_history_limit() -> usize {
    1000
}
