//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MetricSink` - Delivery of metric batches to the remote collector
//! - `KeyValueStore` - Durable persistence for the offline backlog
//! - `Clock` - Time source, injectable for deterministic tests
//! - `RuntimeSignal` - Vocabulary for conditions the hosting runtime reports

mod clock;
mod key_value_store;
mod metric_sink;
mod signals;

pub use clock::Clock;
pub use key_value_store::{KeyValueStore, StoreError};
pub use metric_sink::{DeliveryError, MetricBatch, MetricSink, RetryPolicy};
pub use signals::RuntimeSignal;
