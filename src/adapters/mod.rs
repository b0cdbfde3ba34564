//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `sink` - Metric sinks (HTTP collector, in-memory)
//! - `storage` - Key-value stores (file-backed, in-memory)
//! - `clock` - Wall clock and test clock

pub mod clock;
pub mod sink;
pub mod storage;

pub use clock::{ManualClock, SystemClock};
pub use sink::{HttpMetricSink, HttpSinkConfig, InMemorySink};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
