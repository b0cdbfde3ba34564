//! Pure statistics helpers shared by the pattern engine and reports.
//!
//! Every function is total: empty or degenerate input resolves to 0 rather
//! than an error or a non-finite value.

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation, 0 for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Short-window score trend: sum of consecutive deltas divided by the
/// window length, clamped to [-1, 1]. 0 with fewer than 2 points.
pub fn learning_velocity(scores: &[f64]) -> f64 {
    if scores.len() < 2 {
        return 0.0;
    }
    let total: f64 = scores.windows(2).map(|w| w[1] - w[0]).sum();
    (total / scores.len() as f64).clamp(-1.0, 1.0)
}

/// Inverse variance measure over a user's scores: `max(0, 100 - 10 * stdev)`.
/// Reported as 0 until at least 5 samples exist.
pub fn consistency_score(scores: &[f64]) -> f64 {
    if scores.len() < 5 {
        return 0.0;
    }
    (100.0 - population_std_dev(scores) * 10.0).max(0.0)
}

/// Relative change between the first and last five scores, as a percentage.
///
/// Scores must be in chronological order. 0 with fewer than 2 points or a
/// zero starting average.
pub fn improvement_rate(scores: &[f64]) -> f64 {
    if scores.len() < 2 {
        return 0.0;
    }
    let initial = mean(&scores[..scores.len().min(5)]);
    if initial == 0.0 {
        return 0.0;
    }
    let recent = mean(&scores[scores.len().saturating_sub(5)..]);
    (recent - initial) / initial * 100.0
}

/// Share of correct decisions as a percentage, 0 when none were counted.
pub fn accuracy(correct: u64, incorrect: u64) -> f64 {
    let total = correct + incorrect;
    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64 * 100.0
}
