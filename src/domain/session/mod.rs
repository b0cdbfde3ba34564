//! Session module - Usage windows and activity accounting.

mod analytics;
mod tracker;

pub use analytics::SessionAnalytics;
pub use tracker::{SessionTracker, DEFAULT_IDLE_THRESHOLD_MS};
