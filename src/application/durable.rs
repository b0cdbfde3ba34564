//! Durable backlog for metrics not yet confirmed delivered.
//!
//! Wraps a key-value store with a single logical key holding a JSON array
//! of metrics, capped to a retention limit with oldest-first eviction.

use std::sync::Arc;

use crate::domain::metrics::PerformanceMetric;
use crate::ports::KeyValueStore;

const STORAGE_KEY: &str = "praxis_analytics";

/// Bounded persistent queue of undelivered metrics.
///
/// Every read is fail-soft: a missing key, an unreadable backend, or
/// corrupt stored JSON all behave as an empty backlog.
pub struct DurableQueueStore {
    store: Arc<dyn KeyValueStore>,
    retention_limit: usize,
}

impl DurableQueueStore {
    /// Creates a backlog over the given store, keeping at most
    /// `retention_limit` metrics.
    pub fn new(store: Arc<dyn KeyValueStore>, retention_limit: usize) -> Self {
        Self {
            store,
            retention_limit,
        }
    }

    /// Loads the stored backlog, oldest first.
    pub fn load(&self) -> Vec<PerformanceMetric> {
        let raw = match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read metric backlog, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(metrics) => metrics,
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt metric backlog, treating as empty");
                Vec::new()
            }
        }
    }

    /// Appends metrics to the backlog, evicting the oldest entries once
    /// the retention limit is exceeded.
    ///
    /// Persistence failures are logged and swallowed; the backlog is a
    /// best-effort safety net, not a source of truth.
    pub fn append(&self, metrics: &[PerformanceMetric]) {
        if metrics.is_empty() {
            return;
        }

        let mut combined = self.load();
        combined.extend(metrics.iter().cloned());
        if combined.len() > self.retention_limit {
            let excess = combined.len() - self.retention_limit;
            combined.drain(..excess);
        }

        let raw = match serde_json::to_string(&combined) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize metric backlog");
                return;
            }
        };

        if let Err(e) = self.store.set(STORAGE_KEY, &raw) {
            tracing::warn!(error = %e, "Failed to persist metric backlog");
        }
    }

    /// Drops the entire backlog after a successful replay.
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(STORAGE_KEY) {
            tracing::warn!(error = %e, "Failed to clear metric backlog");
        }
    }
}
