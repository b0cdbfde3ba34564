//! Per-user learning pattern state and its update rules.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::stats;
use crate::domain::foundation::{Mastery, ModuleId, UserId};
use crate::domain::metrics::PerformanceMetric;

/// Number of recent module metrics the velocity window looks at.
pub const VELOCITY_WINDOW: usize = 10;

/// Evolving statistical model of one user's skills.
///
/// # Invariants
///
/// - Every mastery value stays within [0,100].
/// - A module is never in `strong_areas` and `weak_areas` at the same time.
/// - `consistency_score` is 0 until the user has at least 5 metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPattern {
    pub user_id: UserId,
    pub mastery_level: BTreeMap<ModuleId, Mastery>,
    pub strong_areas: BTreeSet<ModuleId>,
    pub weak_areas: BTreeSet<ModuleId>,
    pub improvement_rate: f64,
    pub learning_velocity: f64,
    pub consistency_score: f64,
}

impl LearningPattern {
    /// Creates an empty pattern for a user with no recorded decisions.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            mastery_level: BTreeMap::new(),
            strong_areas: BTreeSet::new(),
            weak_areas: BTreeSet::new(),
            improvement_rate: 0.0,
            learning_velocity: 0.0,
            consistency_score: 0.0,
        }
    }

    /// Mastery for a module, zero if never attempted.
    pub fn mastery(&self, module_id: &ModuleId) -> Mastery {
        self.mastery_level
            .get(module_id)
            .copied()
            .unwrap_or(Mastery::ZERO)
    }
}

/// Maintains one [`LearningPattern`] per user from the decision stream.
///
/// The engine only reacts to decision outcomes; starts and completions feed
/// its statistics indirectly through the metric history the caller passes in.
#[derive(Debug, Default)]
pub struct PatternEngine {
    patterns: HashMap<UserId, LearningPattern>,
}

impl PatternEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one decision outcome to the user's pattern.
    ///
    /// `user_metrics` is the user's retained metric history in chronological
    /// order, including the metric for this decision; the velocity window and
    /// the consistency and improvement statistics are recomputed from it.
    pub fn observe_decision(
        &mut self,
        user_id: &UserId,
        module_id: &ModuleId,
        is_correct: bool,
        user_metrics: &[&PerformanceMetric],
    ) -> &LearningPattern {
        let pattern = self
            .patterns
            .entry(user_id.clone())
            .or_insert_with(|| LearningPattern::new(user_id.clone()));

        let mastery = pattern.mastery(module_id).apply(is_correct);
        pattern.mastery_level.insert(module_id.clone(), mastery);

        if mastery.is_strong() {
            pattern.strong_areas.insert(module_id.clone());
            pattern.weak_areas.remove(module_id);
        } else if mastery.is_weak() {
            pattern.weak_areas.insert(module_id.clone());
            pattern.strong_areas.remove(module_id);
        }
        // Between the thresholds membership is left alone, so a module must
        // fall below 50 to lose strong status once earned.

        let module_scores: Vec<f64> = user_metrics
            .iter()
            .filter(|m| &m.module_id == module_id)
            .map(|m| m.score)
            .collect();
        let window_start = module_scores.len().saturating_sub(VELOCITY_WINDOW);
        let recent = &module_scores[window_start..];
        if recent.len() >= 2 {
            pattern.learning_velocity = stats::learning_velocity(recent);
        }

        let user_scores: Vec<f64> = user_metrics.iter().map(|m| m.score).collect();
        pattern.improvement_rate = stats::improvement_rate(&user_scores);
        pattern.consistency_score = stats::consistency_score(&user_scores);

        pattern
    }

    /// The user's pattern, if any decisions have been observed.
    pub fn pattern(&self, user_id: &UserId) -> Option<&LearningPattern> {
        self.patterns.get(user_id)
    }

    /// The user's pattern, or an empty one for users never observed.
    pub fn pattern_or_empty(&self, user_id: &UserId) -> LearningPattern {
        self.patterns
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| LearningPattern::new(user_id.clone()))
    }
}
