//! Report export - JSON and CSV renderings of an assembled report.

use std::fmt;
use std::str::FromStr;

use crate::domain::reports::AnalyticsReport;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Renders the report in the requested format.
pub fn export_report(report: &AnalyticsReport, format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => export_json(report),
        ExportFormat::Csv => Ok(export_csv(report)),
    }
}

/// Pretty-printed JSON rendering of the full report.
pub fn export_json(report: &AnalyticsReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// CSV rendering: the overview block as `Metric,Value` pairs, a blank
/// line, then the performance trend table.
pub fn export_csv(report: &AnalyticsReport) -> String {
    let mut rows: Vec<String> = vec!["Metric,Value".to_string()];

    let overview = &report.overview;
    rows.push(format!(
        "totalModulesCompleted,{}",
        overview.total_modules_completed
    ));
    rows.push(format!(
        "totalCasesCompleted,{}",
        overview.total_cases_completed
    ));
    rows.push(format!("averageScore,{}", overview.average_score));
    rows.push(format!("totalTimeSpent,{}", overview.total_time_spent));
    rows.push(format!("accuracyRate,{}", overview.accuracy_rate));
    rows.push(format!("improvementRate,{}", overview.improvement_rate));

    rows.push(String::new());
    rows.push("Date,Average Score,Total Time,Cases Completed".to_string());
    for point in &report.performance_trend {
        rows.push(format!(
            "{},{},{},{}",
            point.date, point.average_score, point.total_time, point.cases_completed
        ));
    }

    rows.join("\n")
}
