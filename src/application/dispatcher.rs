//! BatchDispatcher - Background task for metric delivery.
//!
//! The dispatcher owns every suspension point in the engine:
//! 1. Recorder calls enqueue metrics synchronously
//! 2. **The dispatcher flushes the queue to the sink** ← This module
//!
//! ## Flush triggers
//!
//! | Trigger | Condition |
//! |---------|-----------|
//! | Timer | flush interval elapsed and the queue is non-empty |
//! | Wakeup | queue reached the batch size, or a backlog replay was scheduled |
//!
//! ## Graceful Shutdown
//!
//! On the shutdown signal the dispatcher closes the session and makes a
//! final flush attempt before stopping; anything undeliverable is left
//! in the durable backlog.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use super::service::{AnalyticsService, FlushOutcome};

/// Configuration for the BatchDispatcher task.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// How often to flush a non-empty queue regardless of its size.
    pub flush_interval: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            flush_interval: Duration::from_millis(5000),
        }
    }
}

impl DispatcherConfig {
    /// Create config with custom flush interval.
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }
}

/// Background task that drains the metric queue into the sink.
pub struct BatchDispatcher {
    service: Arc<AnalyticsService>,
    config: DispatcherConfig,
}

impl BatchDispatcher {
    /// Create a new BatchDispatcher with default configuration.
    pub fn new(service: Arc<AnalyticsService>) -> Self {
        Self {
            service,
            config: DispatcherConfig::default(),
        }
    }

    /// Create a new BatchDispatcher with custom configuration.
    pub fn with_config(service: Arc<AnalyticsService>, config: DispatcherConfig) -> Self {
        Self { service, config }
    }

    /// Run the dispatcher loop until the shutdown signal is received.
    ///
    /// # Arguments
    ///
    /// * `shutdown` - Watch channel that signals when to stop
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.flush_interval);

        loop {
            tokio::select! {
                // Check for shutdown signal
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        // Shutdown requested - close the session and make
                        // a final flush attempt before exiting
                        self.service.shutdown().await;
                        return;
                    }
                }

                // Flush interval elapsed
                _ = interval.tick() => {
                    self.poll_once().await;
                }

                // Size trigger or replay request from the service
                _ = self.service.dispatch_requested() => {
                    if self.service.take_replay_request() {
                        self.service.replay_backlog().await;
                    }
                    if self.service.flush_due() {
                        self.service.flush().await;
                    }
                }
            }
        }
    }

    /// Run exactly one timer cycle (for testing): replay the backlog if
    /// scheduled, then flush whatever is queued.
    pub async fn poll_once(&self) -> FlushOutcome {
        if self.service.take_replay_request() {
            self.service.replay_backlog().await;
        }

        if self.service.queued_len() > 0 {
            self.service.flush().await
        } else {
            FlushOutcome::Empty
        }
    }
}
