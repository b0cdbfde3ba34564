//! HTTP metric sink - Ships batches to the analytics collector endpoint.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::ports::{DeliveryError, MetricBatch, MetricSink};

/// Configuration for the HTTP sink.
#[derive(Debug, Clone)]
pub struct HttpSinkConfig {
    /// Collector endpoint receiving `POST` batches.
    pub endpoint: String,
    /// Bearer token attached to every request, if configured.
    auth_token: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpSinkConfig {
    /// Creates a configuration for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_token: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the bearer token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(Secret::new(token.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the token (for building requests).
    fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_ref().map(|t| t.expose_secret().as_str())
    }
}

/// Metric sink backed by the remote collector's HTTP API.
pub struct HttpMetricSink {
    config: HttpSinkConfig,
    client: Client,
}

impl HttpMetricSink {
    /// Creates a new sink with the given configuration.
    pub fn new(config: HttpSinkConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl MetricSink for HttpMetricSink {
    async fn deliver(&self, batch: &MetricBatch) -> Result<(), DeliveryError> {
        let mut request = self.client.post(&self.config.endpoint).json(batch);
        if let Some(token) = self.config.auth_token() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_ten_second_timeout_and_no_token() {
        let config = HttpSinkConfig::new("https://collector.example/api/analytics");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.auth_token().is_none());
    }

    #[test]
    fn config_builder_sets_token_and_timeout() {
        let config = HttpSinkConfig::new("https://collector.example/api/analytics")
            .with_auth_token("secret-token")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.auth_token(), Some("secret-token"));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn token_is_not_exposed_by_debug() {
        let config =
            HttpSinkConfig::new("https://collector.example/api/analytics").with_auth_token("hunter2");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
    }
}
