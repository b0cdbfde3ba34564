//! Metrics module - Performance event records.

mod metric;

pub use metric::{PerformanceMetric, TimeRange};
