//! MetricSink port - Interface for delivering metric batches to a remote
//! collector.
//!
//! Delivery is at-least-once: a batch the sink reports as failed is requeued
//! and persisted by the dispatcher, so the collector may eventually see the
//! same metric twice. The engine never deduplicates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::metrics::PerformanceMetric;

/// Envelope handed to the sink for one delivery.
///
/// `session_id` is the session current at delivery time, which for replayed
/// batches can differ from the sessions the metrics were recorded under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBatch {
    pub metrics: Vec<PerformanceMetric>,
    pub session_id: SessionId,
    /// When the delivery was assembled, epoch milliseconds.
    pub timestamp: Timestamp,
}

impl MetricBatch {
    /// Creates a delivery envelope assembled at `at`.
    pub fn new(metrics: Vec<PerformanceMetric>, session_id: SessionId, at: Timestamp) -> Self {
        Self {
            metrics,
            session_id,
            timestamp: at,
        }
    }

    /// Number of metrics in the batch.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// True when the batch carries no metrics.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Bounded retry applied to sink delivery within one flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total delivery attempts per flush, including the first.
    pub max_attempts: u32,
    /// Fixed delay between attempts, in milliseconds.
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 250,
        }
    }
}

/// Port for shipping metric batches to the remote collector.
#[async_trait]
pub trait MetricSink: Send + Sync {
    /// Delivers one batch.
    ///
    /// An `Err` means the batch must be treated as undelivered, even though
    /// it may in fact have reached the collector.
    async fn deliver(&self, batch: &MetricBatch) -> Result<(), DeliveryError>;
}

/// Errors from metric delivery.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The collector answered with a non-success status.
    #[error("collector rejected batch with status {status}")]
    Rejected { status: u16 },
}
