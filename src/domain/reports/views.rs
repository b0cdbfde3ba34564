//! Report view DTOs, shaped for the reporting surface.

use serde::Serialize;

use crate::domain::foundation::ModuleId;
use crate::domain::pattern::LearningPattern;
use crate::domain::session::SessionAnalytics;

/// Headline statistics over a metric selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    /// Distinct modules touched.
    pub total_modules_completed: usize,
    /// Distinct cases touched.
    pub total_cases_completed: usize,
    pub average_score: f64,
    /// Milliseconds summed over all events.
    pub total_time_spent: u64,
    pub accuracy_rate: f64,
    pub improvement_rate: f64,
}

/// One calendar-date bucket of the performance trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// UTC date, `YYYY-MM-DD`.
    pub date: String,
    pub average_score: f64,
    pub total_time: u64,
    /// Number of events in the bucket.
    pub cases_completed: usize,
}

/// Aggregated per-module performance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleBreakdown {
    pub module_id: ModuleId,
    pub attempts: usize,
    pub average_score: f64,
    /// Mean milliseconds per event.
    pub average_time: f64,
    pub accuracy: f64,
}

/// One hour-of-day bucket; all 24 are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPerformance {
    /// UTC hour, 0-23.
    pub hour: u32,
    pub average_score: f64,
    /// Number of events in the bucket.
    pub activity_level: usize,
}

/// The full report bundle returned to the reporting surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub overview: AnalyticsOverview,
    pub performance_trend: Vec<TrendPoint>,
    pub module_breakdown: Vec<ModuleBreakdown>,
    pub time_analysis: Vec<HourlyPerformance>,
    /// Absent (null) for users with no observed decisions.
    pub learning_pattern: Option<LearningPattern>,
    pub sessions: Vec<SessionAnalytics>,
    pub recommendations: Vec<String>,
}
