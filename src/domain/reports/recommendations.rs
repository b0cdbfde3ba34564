//! Deterministic study recommendations derived from a user's pattern and
//! hour-of-day performance.

use std::cmp::Ordering;

use crate::domain::pattern::LearningPattern;

use super::views::HourlyPerformance;

/// Consistency scores below this trigger a routine warning.
const CONSISTENCY_WARN_BELOW: f64 = 60.0;

/// Velocity above this counts as accelerating progress.
const VELOCITY_ACCELERATION_ABOVE: f64 = 0.5;

/// How many peak hours to surface.
const PEAK_HOUR_COUNT: usize = 3;

/// Builds the ordered recommendation list.
///
/// Pattern-derived messages come first (weak areas, consistency, velocity),
/// then the peak-hours note. Users without a pattern only receive the
/// time-based recommendation.
pub fn generate(
    time_analysis: &[HourlyPerformance],
    pattern: Option<&LearningPattern>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some(pattern) = pattern {
        if !pattern.weak_areas.is_empty() {
            let areas: Vec<&str> = pattern.weak_areas.iter().map(|m| m.as_str()).collect();
            recommendations.push(format!("Focus on your weak areas: {}", areas.join(", ")));
        }

        if pattern.consistency_score < CONSISTENCY_WARN_BELOW {
            recommendations.push(
                "Your performance fluctuates. Build a regular study routine.".to_string(),
            );
        }

        if pattern.learning_velocity < 0.0 {
            recommendations
                .push("Your learning pace is dropping. Practice with simpler cases.".to_string());
        } else if pattern.learning_velocity > VELOCITY_ACCELERATION_ABOVE {
            recommendations
                .push("Great progress! You are ready for more challenging cases.".to_string());
        }
    }

    let peak_hours = peak_hours(time_analysis);
    if !peak_hours.is_empty() {
        let formatted: Vec<String> = peak_hours.iter().map(|h| format!("{h}:00")).collect();
        recommendations.push(format!(
            "Your most productive hours: {}",
            formatted.join(", ")
        ));
    }

    recommendations
}

/// Up to three hours with the highest mean score, best first.
///
/// Hours without a positive mean are excluded; ties keep the earlier hour
/// first.
fn peak_hours(time_analysis: &[HourlyPerformance]) -> Vec<u32> {
    let mut scored: Vec<&HourlyPerformance> = time_analysis
        .iter()
        .filter(|h| h.average_score > 0.0)
        .collect();
    scored.sort_by(|a, b| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(Ordering::Equal)
    });
    scored
        .iter()
        .take(PEAK_HOUR_COUNT)
        .map(|h| h.hour)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Mastery, ModuleId, UserId};

    fn quiet_day() -> Vec<HourlyPerformance> {
        (0..24)
            .map(|hour| HourlyPerformance {
                hour,
                average_score: 0.0,
                activity_level: 0,
            })
            .collect()
    }

    fn pattern() -> LearningPattern {
        let mut p = LearningPattern::new(UserId::new("u1"));
        // Values that trigger none of the messages.
        p.consistency_score = 90.0;
        p.learning_velocity = 0.1;
        p
    }

    #[test]
    fn no_pattern_and_quiet_day_yield_nothing() {
        assert!(generate(&quiet_day(), None).is_empty());
    }

    #[test]
    fn stable_pattern_yields_nothing() {
        assert!(generate(&quiet_day(), Some(&pattern())).is_empty());
    }

    #[test]
    fn weak_areas_are_listed_in_order() {
        let mut p = pattern();
        p.weak_areas.insert(ModuleId::new("neuro"));
        p.weak_areas.insert(ModuleId::new("cardio"));
        p.mastery_level.insert(ModuleId::new("neuro"), Mastery::new(20));
        p.mastery_level.insert(ModuleId::new("cardio"), Mastery::new(30));

        let recs = generate(&quiet_day(), Some(&p));
        assert_eq!(recs, vec!["Focus on your weak areas: cardio, neuro"]);
    }

    #[test]
    fn low_consistency_warns_about_routine() {
        let mut p = pattern();
        p.consistency_score = 45.0;

        let recs = generate(&quiet_day(), Some(&p));
        assert_eq!(
            recs,
            vec!["Your performance fluctuates. Build a regular study routine."]
        );
    }

    #[test]
    fn velocity_messages_are_mutually_exclusive() {
        let mut p = pattern();
        p.learning_velocity = -0.2;
        let recs = generate(&quiet_day(), Some(&p));
        assert_eq!(
            recs,
            vec!["Your learning pace is dropping. Practice with simpler cases."]
        );

        p.learning_velocity = 0.8;
        let recs = generate(&quiet_day(), Some(&p));
        assert_eq!(
            recs,
            vec!["Great progress! You are ready for more challenging cases."]
        );
    }

    #[test]
    fn peak_hours_pick_top_three_by_score() {
        let mut day = quiet_day();
        day[9].average_score = 70.0;
        day[14].average_score = 95.0;
        day[20].average_score = 80.0;
        day[22].average_score = 10.0;

        let recs = generate(&day, None);
        assert_eq!(recs, vec!["Your most productive hours: 14:00, 20:00, 9:00"]);
    }

    #[test]
    fn peak_hour_ties_prefer_the_earlier_hour() {
        let mut day = quiet_day();
        day[8].average_score = 50.0;
        day[16].average_score = 50.0;

        let recs = generate(&day, None);
        assert_eq!(recs, vec!["Your most productive hours: 8:00, 16:00"]);
    }

    #[test]
    fn messages_follow_a_fixed_order() {
        let mut p = pattern();
        p.weak_areas.insert(ModuleId::new("renal"));
        p.consistency_score = 30.0;
        p.learning_velocity = -0.4;

        let mut day = quiet_day();
        day[11].average_score = 60.0;

        let recs = generate(&day, Some(&p));
        assert_eq!(recs.len(), 4);
        assert!(recs[0].starts_with("Focus on your weak areas"));
        assert!(recs[1].starts_with("Your performance fluctuates"));
        assert!(recs[2].starts_with("Your learning pace is dropping"));
        assert!(recs[3].starts_with("Your most productive hours"));
    }
}
