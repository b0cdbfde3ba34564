//! Performance metric records, the unit of telemetry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CaseId, DecisionId, ModuleId, SessionId, Timestamp, UserId};

/// One recorded performance event.
///
/// Produced by the recorder API and owned by the in-memory queue until a
/// flush hands it to the remote sink. A bounded local replica is kept for
/// session and report queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetric {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub module_id: ModuleId,
    pub case_id: CaseId,
    /// Epoch milliseconds on the wire.
    pub timestamp: Timestamp,
    /// 0/1 for a single decision, 0-100 for a completion.
    pub score: f64,
    /// Milliseconds attributed to this event.
    pub time_spent: u64,
    pub correct_decisions: u32,
    pub incorrect_decisions: u32,
    /// Ordered decision identifiers attributed to this event.
    #[serde(default)]
    pub decisions: Vec<DecisionId>,
    /// Decisions flagged both incorrect and high-stakes.
    pub critical_errors: Vec<DecisionId>,
    /// 0 for starts and decisions, 100 for completions.
    pub completion_rate: u8,
}

impl PerformanceMetric {
    /// Zero-score placeholder recorded when a module is opened.
    pub fn module_start(
        user_id: UserId,
        session_id: SessionId,
        module_id: ModuleId,
        case_id: CaseId,
        at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            session_id,
            module_id,
            case_id,
            timestamp: at,
            score: 0.0,
            time_spent: 0,
            correct_decisions: 0,
            incorrect_decisions: 0,
            decisions: Vec::new(),
            critical_errors: Vec::new(),
            completion_rate: 0,
        }
    }

    /// One decision outcome; score is 1 for correct, 0 otherwise.
    #[allow(clippy::too_many_arguments)]
    pub fn decision(
        user_id: UserId,
        session_id: SessionId,
        module_id: ModuleId,
        case_id: CaseId,
        decision_id: DecisionId,
        is_correct: bool,
        response_time_ms: u64,
        is_critical: bool,
        at: Timestamp,
    ) -> Self {
        let critical_errors = if is_critical && !is_correct {
            vec![decision_id.clone()]
        } else {
            Vec::new()
        };
        Self {
            user_id,
            session_id,
            module_id,
            case_id,
            timestamp: at,
            score: if is_correct { 1.0 } else { 0.0 },
            time_spent: response_time_ms,
            correct_decisions: u32::from(is_correct),
            incorrect_decisions: u32::from(!is_correct),
            decisions: vec![decision_id],
            critical_errors,
            completion_rate: 0,
        }
    }

    /// Terminal record for a finished module.
    ///
    /// Correct decisions are derived as `floor(final_score / 10)`, clamped to
    /// the number of decisions actually taken; the remainder counts as
    /// incorrect. The derivation approximates a 10-points-per-decision
    /// scoring scheme rather than recounting outcomes.
    #[allow(clippy::too_many_arguments)]
    pub fn module_completion(
        user_id: UserId,
        session_id: SessionId,
        module_id: ModuleId,
        case_id: CaseId,
        final_score: f64,
        total_time_ms: u64,
        decisions: Vec<DecisionId>,
        at: Timestamp,
    ) -> Self {
        let taken = decisions.len() as u32;
        let derived = (final_score / 10.0).floor();
        let correct_decisions = if derived.is_finite() && derived > 0.0 {
            (derived as u64).min(u64::from(taken)) as u32
        } else {
            0
        };
        Self {
            user_id,
            session_id,
            module_id,
            case_id,
            timestamp: at,
            score: final_score,
            time_spent: total_time_ms,
            correct_decisions,
            incorrect_decisions: taken - correct_decisions,
            decisions,
            critical_errors: Vec::new(),
            completion_rate: 100,
        }
    }

    /// Decisions counted by this event, correct plus incorrect.
    pub fn decisions_counted(&self) -> u32 {
        self.correct_decisions + self.incorrect_decisions
    }
}

/// Inclusive timestamp window for report queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeRange {
    /// Creates a range covering `[start, end]`.
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Range covering the `days` days up to and including `end`.
    ///
    /// Days are fixed 24-hour periods; a month preset of 30 days is an
    /// approximation.
    pub fn last_days(end: Timestamp, days: i64) -> Self {
        Self {
            start: end.plus_millis(-days * 86_400_000),
            end,
        }
    }

    /// True if the timestamp falls within the range, bounds included.
    pub fn contains(&self, at: &Timestamp) -> bool {
        !at.is_before(&self.start) && !at.is_after(&self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (UserId, SessionId, ModuleId, CaseId) {
        (
            UserId::new("user-1"),
            SessionId::new(),
            ModuleId::new("cardio"),
            CaseId::new("case-7"),
        )
    }

    #[test]
    fn module_start_is_zeroed_placeholder() {
        let (u, s, m, c) = ids();
        let metric = PerformanceMetric::module_start(u, s, m, c, Timestamp::from_millis(1_000));

        assert_eq!(metric.score, 0.0);
        assert_eq!(metric.time_spent, 0);
        assert_eq!(metric.decisions_counted(), 0);
        assert_eq!(metric.completion_rate, 0);
        assert!(metric.decisions.is_empty());
        assert!(metric.critical_errors.is_empty());
    }

    #[test]
    fn correct_decision_scores_one() {
        let (u, s, m, c) = ids();
        let metric = PerformanceMetric::decision(
            u,
            s,
            m,
            c,
            DecisionId::new("d-1"),
            true,
            4_200,
            true,
            Timestamp::from_millis(1_000),
        );

        assert_eq!(metric.score, 1.0);
        assert_eq!(metric.time_spent, 4_200);
        assert_eq!(metric.correct_decisions, 1);
        assert_eq!(metric.incorrect_decisions, 0);
        assert_eq!(metric.decisions, vec![DecisionId::new("d-1")]);
        assert!(metric.critical_errors.is_empty());
    }

    #[test]
    fn incorrect_critical_decision_records_critical_error() {
        let (u, s, m, c) = ids();
        let metric = PerformanceMetric::decision(
            u,
            s,
            m,
            c,
            DecisionId::new("d-9"),
            false,
            800,
            true,
            Timestamp::from_millis(1_000),
        );

        assert_eq!(metric.score, 0.0);
        assert_eq!(metric.correct_decisions, 0);
        assert_eq!(metric.incorrect_decisions, 1);
        assert_eq!(metric.critical_errors, vec![DecisionId::new("d-9")]);
    }

    #[test]
    fn incorrect_noncritical_decision_has_no_critical_error() {
        let (u, s, m, c) = ids();
        let metric = PerformanceMetric::decision(
            u,
            s,
            m,
            c,
            DecisionId::new("d-2"),
            false,
            800,
            false,
            Timestamp::from_millis(1_000),
        );

        assert!(metric.critical_errors.is_empty());
    }

    #[test]
    fn completion_derives_counts_from_score() {
        let (u, s, m, c) = ids();
        let decisions: Vec<DecisionId> =
            (0..10).map(|i| DecisionId::new(format!("d-{i}"))).collect();
        let metric = PerformanceMetric::module_completion(
            u,
            s,
            m,
            c,
            85.0,
            120_000,
            decisions,
            Timestamp::from_millis(1_000),
        );

        assert_eq!(metric.correct_decisions, 8);
        assert_eq!(metric.incorrect_decisions, 2);
        assert_eq!(metric.completion_rate, 100);
        assert_eq!(metric.score, 85.0);
    }

    #[test]
    fn completion_clamps_derived_correct_to_decision_count() {
        let (u, s, m, c) = ids();
        let decisions = vec![
            DecisionId::new("d-0"),
            DecisionId::new("d-1"),
            DecisionId::new("d-2"),
        ];
        let metric = PerformanceMetric::module_completion(
            u,
            s,
            m,
            c,
            100.0,
            60_000,
            decisions,
            Timestamp::from_millis(1_000),
        );

        assert_eq!(metric.correct_decisions, 3);
        assert_eq!(metric.incorrect_decisions, 0);
    }

    #[test]
    fn completion_treats_negative_score_as_no_correct_decisions() {
        let (u, s, m, c) = ids();
        let decisions = vec![DecisionId::new("d-0"), DecisionId::new("d-1")];
        let metric = PerformanceMetric::module_completion(
            u,
            s,
            m,
            c,
            -15.0,
            5_000,
            decisions,
            Timestamp::from_millis(1_000),
        );

        assert_eq!(metric.correct_decisions, 0);
        assert_eq!(metric.incorrect_decisions, 2);
    }

    #[test]
    fn metric_serializes_with_camel_case_keys_and_millis_timestamp() {
        let (u, s, m, c) = ids();
        let metric = PerformanceMetric::decision(
            u,
            s,
            m,
            c,
            DecisionId::new("d-1"),
            true,
            500,
            false,
            Timestamp::from_millis(1_705_314_600_000),
        );

        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["moduleId"], "cardio");
        assert_eq!(json["timeSpent"], 500);
        assert_eq!(json["correctDecisions"], 1);
        assert_eq!(json["completionRate"], 0);
        assert_eq!(json["timestamp"], 1_705_314_600_000_i64);
        assert!(json["criticalErrors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn metric_deserializes_without_decisions_field() {
        let json = r#"{
            "userId": "u",
            "sessionId": "550e8400-e29b-41d4-a716-446655440000",
            "moduleId": "m",
            "caseId": "c",
            "timestamp": 1000,
            "score": 1.0,
            "timeSpent": 10,
            "correctDecisions": 1,
            "incorrectDecisions": 0,
            "criticalErrors": [],
            "completionRate": 0
        }"#;
        let metric: PerformanceMetric = serde_json::from_str(json).unwrap();
        assert!(metric.decisions.is_empty());
    }

    #[test]
    fn time_range_bounds_are_inclusive() {
        let range = TimeRange::new(Timestamp::from_millis(1_000), Timestamp::from_millis(2_000));

        assert!(range.contains(&Timestamp::from_millis(1_000)));
        assert!(range.contains(&Timestamp::from_millis(1_500)));
        assert!(range.contains(&Timestamp::from_millis(2_000)));
        assert!(!range.contains(&Timestamp::from_millis(999)));
        assert!(!range.contains(&Timestamp::from_millis(2_001)));
    }

    #[test]
    fn time_range_last_days_spans_fixed_periods() {
        let end = Timestamp::from_millis(7 * 86_400_000);
        let range = TimeRange::last_days(end, 7);
        assert_eq!(range.start.as_millis(), 0);
        assert_eq!(range.end.as_millis(), 7 * 86_400_000);
    }
}
