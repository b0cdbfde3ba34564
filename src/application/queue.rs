//! In-memory FIFO queue feeding the batch dispatcher.

use std::mem;
use std::sync::Mutex;

use crate::domain::metrics::PerformanceMetric;

/// Append-only metric queue shared between the recorder and the dispatcher.
///
/// A flush snapshots-and-clears the whole queue in one swap, so metrics
/// recorded while a delivery is in flight land in the next batch.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned, which only happens
/// if another thread panicked while holding it.
pub struct MetricQueue {
    metrics: Mutex<Vec<PerformanceMetric>>,
}

impl MetricQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            metrics: Mutex::new(Vec::new()),
        }
    }

    /// Appends a metric and returns the new queue length.
    pub fn push(&self, metric: PerformanceMetric) -> usize {
        let mut metrics = self
            .metrics
            .lock()
            .expect("MetricQueue: metrics lock poisoned");
        metrics.push(metric);
        metrics.len()
    }

    /// Takes the entire queue contents, leaving it empty.
    pub fn take_all(&self) -> Vec<PerformanceMetric> {
        mem::take(
            &mut *self
                .metrics
                .lock()
                .expect("MetricQueue: metrics lock poisoned"),
        )
    }

    /// Puts a failed batch back at the front, ahead of newer metrics.
    pub fn requeue_front(&self, batch: Vec<PerformanceMetric>) {
        let mut metrics = self
            .metrics
            .lock()
            .expect("MetricQueue: metrics lock poisoned");
        let newer = mem::replace(&mut *metrics, batch);
        metrics.extend(newer);
    }

    /// Current queue length.
    pub fn len(&self) -> usize {
        self.metrics
            .lock()
            .expect("MetricQueue: metrics lock poisoned")
            .len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MetricQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CaseId, ModuleId, SessionId, Timestamp, UserId};

    fn metric(case: &str) -> PerformanceMetric {
        PerformanceMetric::module_start(
            UserId::new("u1"),
            SessionId::new(),
            ModuleId::new("cardiology"),
            CaseId::new(case),
            Timestamp::from_millis(1_705_314_600_000),
        )
    }

    #[test]
    fn push_reports_growing_length() {
        let queue = MetricQueue::new();

        assert_eq!(queue.push(metric("c1")), 1);
        assert_eq!(queue.push(metric("c2")), 2);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn take_all_empties_the_queue() {
        let queue = MetricQueue::new();
        queue.push(metric("c1"));
        queue.push(metric("c2"));

        let taken = queue.take_all();

        assert_eq!(taken.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn requeue_front_keeps_older_metrics_first() {
        let queue = MetricQueue::new();
        queue.push(metric("old-1"));
        queue.push(metric("old-2"));

        let snapshot = queue.take_all();
        queue.push(metric("new-1"));
        queue.requeue_front(snapshot);

        let drained = queue.take_all();
        let cases: Vec<&str> = drained.iter().map(|m| m.case_id.as_str()).collect();
        assert_eq!(cases, vec!["old-1", "old-2", "new-1"]);
    }
}
