//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `metrics` - Performance event records and time-range filters
//! - `session` - Usage windows and activity accounting
//! - `pattern` - Per-user adaptive learning model and statistics
//! - `reports` - Read-only aggregated views and recommendations

pub mod foundation;
pub mod metrics;
pub mod pattern;
pub mod reports;
pub mod session;
