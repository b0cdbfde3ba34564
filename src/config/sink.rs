//! Sink configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Remote sink configuration (analytics collector endpoint)
#[derive(Debug, Clone, Deserialize)]
pub struct SinkConfig {
    /// Collector endpoint URL receiving metric batches
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token for the collector, if it requires one
    pub auth_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl SinkConfig {
    /// Get the request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate sink configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.endpoint.is_empty() {
            return Err(ValidationError::MissingRequired("SINK__ENDPOINT"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidEndpoint);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            auth_token: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:3000/api/analytics".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_config_defaults() {
        let config = SinkConfig::default();
        assert_eq!(config.endpoint, "http://localhost:3000/api/analytics");
        assert!(config.auth_token.is_none());
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_request_timeout_duration() {
        let config = SinkConfig {
            request_timeout_secs: 3,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_validation_empty_endpoint() {
        let config = SinkConfig {
            endpoint: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_non_http_endpoint() {
        let config = SinkConfig {
            endpoint: "ftp://collector.example".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidEndpoint)
        ));
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = SinkConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SinkConfig {
            request_timeout_secs: 500,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
