//! Metric sink adapters.

mod http;
mod in_memory;

pub use http::{HttpMetricSink, HttpSinkConfig};
pub use in_memory::InMemorySink;
