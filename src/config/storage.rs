//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Durable backlog storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for the durable backlog; defaults to the platform's
    /// local data directory
    pub dir: Option<String>,

    /// How many undelivered metrics the backlog keeps
    #[serde(default = "default_retention_limit")]
    pub retention_limit: usize,
}

impl StorageConfig {
    /// Resolve the backlog directory, falling back to the platform's
    /// local data directory (or the working directory as a last resort).
    pub fn resolved_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dir {
            return PathBuf::from(dir);
        }
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("praxis-analytics")
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.retention_limit == 0 {
            return Err(ValidationError::InvalidRetentionLimit);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            retention_limit: default_retention_limit(),
        }
    }
}

fn default_retention_limit() -> usize {
    1000
}
