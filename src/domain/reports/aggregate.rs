//! Pure aggregation over metric snapshots.
//!
//! Every function takes a borrowed metric selection and produces a view DTO.
//! Nothing here mutates state or performs IO; the caller decides which
//! metrics are in scope (user filter, time range) before aggregating.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::metrics::PerformanceMetric;
use crate::domain::pattern::stats;
use crate::domain::pattern::LearningPattern;
use crate::domain::session::SessionAnalytics;

use super::recommendations;
use super::views::{
    AnalyticsOverview, AnalyticsReport, HourlyPerformance, ModuleBreakdown, TrendPoint,
};

/// Headline statistics; all ratios resolve to 0 on an empty selection.
pub fn overview(metrics: &[&PerformanceMetric]) -> AnalyticsOverview {
    let modules: BTreeSet<_> = metrics.iter().map(|m| &m.module_id).collect();
    let cases: BTreeSet<_> = metrics.iter().map(|m| &m.case_id).collect();
    let scores: Vec<f64> = metrics.iter().map(|m| m.score).collect();

    let correct: u64 = metrics.iter().map(|m| u64::from(m.correct_decisions)).sum();
    let incorrect: u64 = metrics
        .iter()
        .map(|m| u64::from(m.incorrect_decisions))
        .sum();

    let mut by_time: Vec<&PerformanceMetric> = metrics.to_vec();
    by_time.sort_by_key(|m| m.timestamp);
    let ordered_scores: Vec<f64> = by_time.iter().map(|m| m.score).collect();

    AnalyticsOverview {
        total_modules_completed: modules.len(),
        total_cases_completed: cases.len(),
        average_score: stats::mean(&scores),
        total_time_spent: metrics.iter().map(|m| m.time_spent).sum(),
        accuracy_rate: stats::accuracy(correct, incorrect),
        improvement_rate: stats::improvement_rate(&ordered_scores),
    }
}

/// Metrics grouped by UTC calendar date, buckets in date order.
pub fn performance_trend(metrics: &[&PerformanceMetric]) -> Vec<TrendPoint> {
    let mut daily: BTreeMap<String, (usize, f64, u64)> = BTreeMap::new();
    for metric in metrics {
        let bucket = daily.entry(metric.timestamp.date_key()).or_default();
        bucket.0 += 1;
        bucket.1 += metric.score;
        bucket.2 += metric.time_spent;
    }

    daily
        .into_iter()
        .map(|(date, (count, score_sum, time_sum))| TrendPoint {
            date,
            average_score: score_sum / count as f64,
            total_time: time_sum,
            cases_completed: count,
        })
        .collect()
}

/// Metrics grouped by module, in module id order.
pub fn module_breakdown(metrics: &[&PerformanceMetric]) -> Vec<ModuleBreakdown> {
    #[derive(Default)]
    struct Acc {
        attempts: usize,
        score_sum: f64,
        time_sum: u64,
        correct: u64,
        incorrect: u64,
    }

    let mut modules: BTreeMap<&crate::domain::foundation::ModuleId, Acc> = BTreeMap::new();
    for metric in metrics {
        let acc = modules.entry(&metric.module_id).or_default();
        acc.attempts += 1;
        acc.score_sum += metric.score;
        acc.time_sum += metric.time_spent;
        acc.correct += u64::from(metric.correct_decisions);
        acc.incorrect += u64::from(metric.incorrect_decisions);
    }

    modules
        .into_iter()
        .map(|(module_id, acc)| ModuleBreakdown {
            module_id: module_id.clone(),
            attempts: acc.attempts,
            average_score: acc.score_sum / acc.attempts as f64,
            average_time: acc.time_sum as f64 / acc.attempts as f64,
            accuracy: stats::accuracy(acc.correct, acc.incorrect),
        })
        .collect()
}

/// Metrics bucketed by UTC hour of day. All 24 buckets are returned, empty
/// ones with a zero average and zero activity.
pub fn time_analysis(metrics: &[&PerformanceMetric]) -> Vec<HourlyPerformance> {
    let mut hourly = [(0usize, 0.0f64); 24];
    for metric in metrics {
        let hour = metric.timestamp.hour() as usize;
        hourly[hour].0 += 1;
        hourly[hour].1 += metric.score;
    }

    hourly
        .iter()
        .enumerate()
        .map(|(hour, &(count, score_sum))| HourlyPerformance {
            hour: hour as u32,
            average_score: if count > 0 {
                score_sum / count as f64
            } else {
                0.0
            },
            activity_level: count,
        })
        .collect()
}

/// Assembles the full report bundle from a metric selection, the user's
/// pattern (if any), and their sessions.
pub fn detailed_report(
    metrics: &[&PerformanceMetric],
    pattern: Option<LearningPattern>,
    sessions: Vec<SessionAnalytics>,
) -> AnalyticsReport {
    let time_analysis = time_analysis(metrics);
    let recommendations = recommendations::generate(&time_analysis, pattern.as_ref());

    AnalyticsReport {
        overview: overview(metrics),
        performance_trend: performance_trend(metrics),
        module_breakdown: module_breakdown(metrics),
        time_analysis,
        learning_pattern: pattern,
        sessions,
        recommendations,
    }
}
