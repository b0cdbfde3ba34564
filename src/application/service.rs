//! AnalyticsService - The telemetry and adaptive-learning engine.
//!
//! Owns the metric queue, the durable backlog, the session tracker, and
//! the per-user learning patterns. Ingestion is synchronous and
//! infallible; delivery runs on the dispatcher task and recovers locally
//! from every failure.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::futures::Notified;
use tokio::sync::Notify;

use crate::domain::foundation::{CaseId, DecisionId, ModuleId, SessionId, Timestamp, UserId};
use crate::domain::metrics::{PerformanceMetric, TimeRange};
use crate::domain::pattern::{stats, LearningPattern, PatternEngine};
use crate::domain::reports::{aggregate, AnalyticsReport};
use crate::domain::session::{SessionAnalytics, SessionTracker, DEFAULT_IDLE_THRESHOLD_MS};
use crate::ports::{Clock, KeyValueStore, MetricBatch, MetricSink, RetryPolicy, RuntimeSignal};

use super::durable::DurableQueueStore;
use super::queue::MetricQueue;

/// Configuration for the analytics engine.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Queue length that triggers an immediate flush.
    pub batch_size: usize,

    /// Retry policy for sink delivery within one flush.
    pub retry: RetryPolicy,

    /// Activity gap classified as idle rather than active time.
    pub idle_threshold_ms: u64,

    /// How many recent metrics to retain for session and report queries.
    pub history_limit: usize,

    /// How many undelivered metrics the durable backlog keeps.
    pub retention_limit: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            retry: RetryPolicy::default(),
            idle_threshold_ms: DEFAULT_IDLE_THRESHOLD_MS,
            history_limit: 1000,
            retention_limit: 1000,
        }
    }
}

impl AnalyticsConfig {
    /// Create config with custom batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Create config with custom retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Create config with custom idle threshold.
    pub fn with_idle_threshold_ms(mut self, idle_threshold_ms: u64) -> Self {
        self.idle_threshold_ms = idle_threshold_ms;
        self
    }

    /// Create config with custom history limit.
    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    /// Create config with custom durable retention limit.
    pub fn with_retention_limit(mut self, retention_limit: usize) -> Self {
        self.retention_limit = retention_limit;
        self
    }
}

/// Result of one flush or replay attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// The batch reached the sink.
    Delivered(usize),
    /// Delivery failed or the agent is offline; the metrics were requeued
    /// and persisted to the durable backlog.
    Deferred(usize),
    /// Nothing was pending.
    Empty,
}

/// The analytics engine facade.
///
/// One instance per process; it creates its session at construction and
/// tracks it until shutdown. Recorder calls never block on the network
/// and never fail.
///
/// # Panics
///
/// Methods panic if an internal lock is poisoned, which only happens if
/// another thread panicked while holding it.
pub struct AnalyticsService {
    config: AnalyticsConfig,
    sink: Arc<dyn MetricSink>,
    clock: Arc<dyn Clock>,
    queue: MetricQueue,
    durable: DurableQueueStore,
    tracker: Mutex<SessionTracker>,
    history: Mutex<VecDeque<PerformanceMetric>>,
    patterns: Mutex<PatternEngine>,
    online: AtomicBool,
    replay_pending: AtomicBool,
    notify: Notify,
}

impl AnalyticsService {
    /// Creates the engine and starts its session at the clock's current
    /// instant. Connectivity starts out assumed available.
    pub fn new(
        sink: Arc<dyn MetricSink>,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        config: AnalyticsConfig,
    ) -> Self {
        let now = clock.now();
        let tracker = SessionTracker::new(now, config.idle_threshold_ms);
        let durable = DurableQueueStore::new(store, config.retention_limit);

        tracing::debug!(session_id = %tracker.session_id(), "Analytics session started");

        Self {
            config,
            sink,
            clock,
            queue: MetricQueue::new(),
            durable,
            tracker: Mutex::new(tracker),
            history: Mutex::new(VecDeque::new()),
            patterns: Mutex::new(PatternEngine::new()),
            online: AtomicBool::new(true),
            replay_pending: AtomicBool::new(false),
            notify: Notify::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Recorder API
    // ─────────────────────────────────────────────────────────────────────

    /// Records the start of a module as a zero-score placeholder metric.
    pub fn track_module_start(&self, user_id: UserId, module_id: ModuleId, case_id: CaseId) {
        let now = self.clock.now();
        let session_id = self.touch(now);
        let metric = PerformanceMetric::module_start(user_id, session_id, module_id, case_id, now);
        self.enqueue(metric);
    }

    /// Records a single decision outcome and updates the user's learning
    /// pattern from it.
    #[allow(clippy::too_many_arguments)]
    pub fn track_decision(
        &self,
        user_id: UserId,
        module_id: ModuleId,
        case_id: CaseId,
        decision_id: DecisionId,
        is_correct: bool,
        response_time_ms: u64,
        is_critical: bool,
    ) {
        let now = self.clock.now();
        let session_id = self.touch(now);
        let metric = PerformanceMetric::decision(
            user_id.clone(),
            session_id,
            module_id.clone(),
            case_id,
            decision_id,
            is_correct,
            response_time_ms,
            is_critical,
            now,
        );
        self.enqueue(metric);
        self.observe_decision(&user_id, &module_id, is_correct);
    }

    /// Records a completed module and refreshes the session's completion
    /// list and average score.
    pub fn track_module_completion(
        &self,
        user_id: UserId,
        module_id: ModuleId,
        case_id: CaseId,
        final_score: f64,
        total_time_ms: u64,
        decisions: Vec<DecisionId>,
    ) {
        let now = self.clock.now();
        let session_id = self.touch(now);
        let metric = PerformanceMetric::module_completion(
            user_id,
            session_id,
            module_id.clone(),
            case_id,
            final_score,
            total_time_ms,
            decisions,
            now,
        );
        self.enqueue(metric);

        let average = self.session_average_score(session_id);
        let mut tracker = self
            .tracker
            .lock()
            .expect("AnalyticsService: tracker lock poisoned");
        tracker.record_completion(module_id);
        tracker.set_average_score(average);
    }

    /// Routes an upstream runtime signal into the engine.
    pub fn handle_signal(&self, signal: RuntimeSignal) {
        match signal {
            RuntimeSignal::Activity => {
                let now = self.clock.now();
                self.touch(now);
            }
            RuntimeSignal::VisibilityChanged { visible } => {
                let now = self.clock.now();
                let mut tracker = self
                    .tracker
                    .lock()
                    .expect("AnalyticsService: tracker lock poisoned");
                if visible {
                    tracker.resume(now);
                } else {
                    tracker.pause(now);
                }
            }
            RuntimeSignal::ConnectivityChanged { online } => {
                self.online.store(online, Ordering::SeqCst);
                if online {
                    tracing::debug!("Connectivity restored, scheduling backlog replay");
                    self.replay_pending.store(true, Ordering::SeqCst);
                    self.notify.notify_one();
                } else {
                    tracing::info!("Entering offline mode");
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Delivery
    // ─────────────────────────────────────────────────────────────────────

    /// Snapshots the queue and attempts one delivery under the retry
    /// policy. On failure (or while offline) the snapshot goes back to
    /// the front of the queue and into the durable backlog.
    pub async fn flush(&self) -> FlushOutcome {
        let metrics = self.queue.take_all();
        if metrics.is_empty() {
            return FlushOutcome::Empty;
        }

        let count = metrics.len();
        let batch = MetricBatch::new(metrics, self.session_id(), self.clock.now());

        if self.is_online() {
            match self.deliver_with_retry(&batch).await {
                Ok(()) => {
                    tracing::debug!(count, "Delivered metric batch");
                    return FlushOutcome::Delivered(count);
                }
                Err(e) => {
                    tracing::warn!(error = %e, count, "Metric delivery failed, deferring batch");
                }
            }
        } else {
            tracing::debug!(count, "Offline, deferring metric batch");
        }

        self.durable.append(&batch.metrics);
        self.queue.requeue_front(batch.metrics);
        FlushOutcome::Deferred(count)
    }

    /// Attempts one delivery of the entire durable backlog, clearing it
    /// on success. A failed replay leaves the backlog untouched.
    pub async fn replay_backlog(&self) -> FlushOutcome {
        let stored = self.durable.load();
        if stored.is_empty() {
            return FlushOutcome::Empty;
        }

        let count = stored.len();
        let batch = MetricBatch::new(stored, self.session_id(), self.clock.now());

        match self.sink.deliver(&batch).await {
            Ok(()) => {
                tracing::debug!(count, "Replayed metric backlog");
                self.durable.clear();
                FlushOutcome::Delivered(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, count, "Backlog replay failed");
                FlushOutcome::Deferred(count)
            }
        }
    }

    /// Closes the session and makes a final flush attempt. Anything the
    /// flush cannot deliver stays in the durable backlog.
    pub async fn shutdown(&self) -> FlushOutcome {
        let now = self.clock.now();
        {
            let mut tracker = self
                .tracker
                .lock()
                .expect("AnalyticsService: tracker lock poisoned");
            tracker.pause(now);
        }
        tracing::debug!("Analytics session closed");
        self.flush().await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Query API
    // ─────────────────────────────────────────────────────────────────────

    /// The user's learning pattern, if any decisions have been observed.
    pub fn learning_pattern(&self, user_id: &UserId) -> Option<LearningPattern> {
        self.patterns
            .lock()
            .expect("AnalyticsService: patterns lock poisoned")
            .pattern(user_id)
            .cloned()
    }

    /// Analytics for the given session, defaulting to the current one.
    /// Returns `None` for a session this engine does not track.
    pub fn session_analytics(&self, session_id: Option<SessionId>) -> Option<SessionAnalytics> {
        let tracker = self
            .tracker
            .lock()
            .expect("AnalyticsService: tracker lock poisoned");
        let current = tracker.session();
        match session_id {
            Some(id) if id != current.session_id => None,
            _ => Some(current.clone()),
        }
    }

    /// Builds the full report for a user over the retained history,
    /// optionally restricted to a time range.
    pub fn detailed_report(&self, user_id: &UserId, range: Option<&TimeRange>) -> AnalyticsReport {
        let history = self
            .history
            .lock()
            .expect("AnalyticsService: history lock poisoned");
        let metrics: Vec<&PerformanceMetric> = history
            .iter()
            .filter(|m| m.user_id == *user_id)
            .filter(|m| range.map_or(true, |r| r.contains(&m.timestamp)))
            .collect();

        let pattern = self.learning_pattern(user_id);
        let sessions = self.user_sessions(&history, user_id, range);

        aggregate::detailed_report(&metrics, pattern, sessions)
    }

    /// The current session's id.
    pub fn session_id(&self) -> SessionId {
        self.tracker
            .lock()
            .expect("AnalyticsService: tracker lock poisoned")
            .session_id()
    }

    /// Whether the engine currently assumes connectivity.
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Number of metrics waiting in the in-memory queue.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue has reached the batch size.
    pub fn flush_due(&self) -> bool {
        self.queue.len() >= self.config.batch_size
    }

    // ─────────────────────────────────────────────────────────────────────
    // Dispatcher plumbing
    // ─────────────────────────────────────────────────────────────────────

    /// Resolves when a size-triggered flush or a backlog replay has been
    /// requested.
    pub(crate) fn dispatch_requested(&self) -> Notified<'_> {
        self.notify.notified()
    }

    /// Takes the pending replay request, if one was scheduled.
    pub(crate) fn take_replay_request(&self) -> bool {
        self.replay_pending.swap(false, Ordering::SeqCst)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn touch(&self, now: Timestamp) -> SessionId {
        let mut tracker = self
            .tracker
            .lock()
            .expect("AnalyticsService: tracker lock poisoned");
        tracker.touch(now);
        tracker.session_id()
    }

    fn enqueue(&self, metric: PerformanceMetric) {
        {
            let mut history = self
                .history
                .lock()
                .expect("AnalyticsService: history lock poisoned");
            if history.len() == self.config.history_limit {
                history.pop_front();
            }
            history.push_back(metric.clone());
        }

        if self.queue.push(metric) >= self.config.batch_size {
            self.notify.notify_one();
        }
    }

    fn observe_decision(&self, user_id: &UserId, module_id: &ModuleId, is_correct: bool) {
        let history = self
            .history
            .lock()
            .expect("AnalyticsService: history lock poisoned");
        let user_metrics: Vec<&PerformanceMetric> =
            history.iter().filter(|m| m.user_id == *user_id).collect();

        self.patterns
            .lock()
            .expect("AnalyticsService: patterns lock poisoned")
            .observe_decision(user_id, module_id, is_correct, &user_metrics);
    }

    fn session_average_score(&self, session_id: SessionId) -> f64 {
        let history = self
            .history
            .lock()
            .expect("AnalyticsService: history lock poisoned");
        let scores: Vec<f64> = history
            .iter()
            .filter(|m| m.session_id == session_id)
            .map(|m| m.score)
            .collect();
        stats::mean(&scores)
    }

    fn user_sessions(
        &self,
        history: &VecDeque<PerformanceMetric>,
        user_id: &UserId,
        range: Option<&TimeRange>,
    ) -> Vec<SessionAnalytics> {
        let tracker = self
            .tracker
            .lock()
            .expect("AnalyticsService: tracker lock poisoned");
        let session = tracker.session();

        let has_user_metrics = history
            .iter()
            .any(|m| m.session_id == session.session_id && m.user_id == *user_id);
        let in_range = range.map_or(true, |r| r.contains(&session.session_start));

        if has_user_metrics && in_range {
            vec![session.clone()]
        } else {
            Vec::new()
        }
    }

    async fn deliver_with_retry(&self, batch: &MetricBatch) -> Result<(), crate::ports::DeliveryError> {
        let max_attempts = self.config.retry.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.sink.deliver(batch).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < max_attempts => {
                    tracing::debug!(attempt, error = %e, "Delivery attempt failed, retrying");
                    tokio::time::sleep(Duration::from_millis(self.config.retry.backoff_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
