//! In-memory metric sink for testing.
//!
//! Records every delivered batch and can be switched into a failing mode
//! to exercise retry and offline paths.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::RwLock;

use crate::domain::metrics::PerformanceMetric;
use crate::ports::{DeliveryError, MetricBatch, MetricSink};

/// Test sink that keeps delivered batches in memory.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned, which only happens
/// if another test thread panicked while holding it.
pub struct InMemorySink {
    delivered: RwLock<Vec<MetricBatch>>,
    failing: AtomicBool,
    attempts: AtomicU32,
}

impl InMemorySink {
    /// Creates an empty sink that accepts every batch.
    pub fn new() -> Self {
        Self {
            delivered: RwLock::new(Vec::new()),
            failing: AtomicBool::new(false),
            attempts: AtomicU32::new(0),
        }
    }

    /// Switches the sink into (or out of) failing mode.
    ///
    /// While failing, every delivery attempt returns a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns all batches delivered so far.
    pub fn delivered_batches(&self) -> Vec<MetricBatch> {
        self.delivered
            .read()
            .expect("InMemorySink: delivered lock poisoned")
            .clone()
    }

    /// Returns every metric across all delivered batches, in delivery order.
    pub fn delivered_metrics(&self) -> Vec<PerformanceMetric> {
        self.delivered
            .read()
            .expect("InMemorySink: delivered lock poisoned")
            .iter()
            .flat_map(|batch| batch.metrics.iter().cloned())
            .collect()
    }

    /// Returns the number of delivery attempts, including failed ones.
    pub fn attempt_count(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Clears recorded batches and the attempt counter.
    pub fn clear(&self) {
        self.delivered
            .write()
            .expect("InMemorySink: delivered lock poisoned")
            .clear();
        self.attempts.store(0, Ordering::SeqCst);
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricSink for InMemorySink {
    async fn deliver(&self, batch: &MetricBatch) -> Result<(), DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError::Transport(
                "simulated transport failure".to_string(),
            ));
        }

        self.delivered
            .write()
            .expect("InMemorySink: delivered lock poisoned")
            .push(batch.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CaseId, ModuleId, SessionId, Timestamp, UserId};

    fn sample_metric() -> PerformanceMetric {
        PerformanceMetric::module_start(
            UserId::new("user-1"),
            SessionId::new(),
            ModuleId::new("cardiology"),
            CaseId::new("case-1"),
            Timestamp::from_millis(1_705_314_600_000),
        )
    }

    #[tokio::test]
    async fn records_delivered_batches() {
        let sink = InMemorySink::new();
        let batch = MetricBatch::new(
            vec![sample_metric()],
            SessionId::new(),
            Timestamp::from_millis(1_705_314_600_000),
        );

        sink.deliver(&batch).await.unwrap();

        assert_eq!(sink.delivered_batches().len(), 1);
        assert_eq!(sink.delivered_metrics().len(), 1);
        assert_eq!(sink.attempt_count(), 1);
    }

    #[tokio::test]
    async fn failing_mode_rejects_but_counts_attempts() {
        let sink = InMemorySink::new();
        sink.set_failing(true);
        let batch = MetricBatch::new(
            vec![sample_metric()],
            SessionId::new(),
            Timestamp::from_millis(1_705_314_600_000),
        );

        let result = sink.deliver(&batch).await;

        assert!(matches!(result, Err(DeliveryError::Transport(_))));
        assert!(sink.delivered_batches().is_empty());
        assert_eq!(sink.attempt_count(), 1);
    }

    #[tokio::test]
    async fn recovers_after_failing_mode_is_cleared() {
        let sink = InMemorySink::new();
        sink.set_failing(true);
        let batch = MetricBatch::new(
            vec![sample_metric()],
            SessionId::new(),
            Timestamp::from_millis(1_705_314_600_000),
        );

        assert!(sink.deliver(&batch).await.is_err());
        sink.set_failing(false);
        assert!(sink.deliver(&batch).await.is_ok());

        assert_eq!(sink.delivered_batches().len(), 1);
        assert_eq!(sink.attempt_count(), 2);
    }
}
