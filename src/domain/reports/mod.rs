//! Reports module - Read-only aggregated views.
//!
//! Aggregation is pure: the application layer selects the metrics in scope
//! and these functions fold them into view DTOs.

pub mod aggregate;
mod recommendations;
mod views;

pub use views::{
    AnalyticsOverview, AnalyticsReport, HourlyPerformance, ModuleBreakdown, TrendPoint,
};
