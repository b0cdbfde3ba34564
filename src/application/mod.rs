//! Application layer - The engine facade, delivery pipeline, and exports.
//!
//! This layer orchestrates domain operations and coordinates between ports:
//! ingestion through `AnalyticsService`, background delivery through
//! `BatchDispatcher`, and report rendering through the export functions.

mod dispatcher;
mod durable;
mod export;
mod queue;
mod service;

pub use dispatcher::{BatchDispatcher, DispatcherConfig};
pub use durable::DurableQueueStore;
pub use export::{export_csv, export_json, export_report, ExportFormat};
pub use service::{AnalyticsConfig, AnalyticsService, FlushOutcome};
