//! Session lifecycle and activity accounting.

use crate::domain::foundation::{ModuleId, SessionId, Timestamp};

use super::SessionAnalytics;

/// Gaps longer than this count as idle time rather than engagement.
pub const DEFAULT_IDLE_THRESHOLD_MS: u64 = 30_000;

/// Classifies wall-clock time into active and idle intervals for the
/// current session.
///
/// Every recorder call and every explicit activity signal lands here. The
/// gap since the previous activity is attributed to exactly one of the two
/// duration counters, so `active_duration + idle_duration` equals the total
/// observed wall time between the first and last activity.
#[derive(Debug)]
pub struct SessionTracker {
    session: SessionAnalytics,
    last_activity: Timestamp,
    idle_threshold_ms: u64,
}

impl SessionTracker {
    /// Starts a fresh session at `now`.
    pub fn new(now: Timestamp, idle_threshold_ms: u64) -> Self {
        Self {
            session: SessionAnalytics::new(SessionId::new(), now),
            last_activity: now,
            idle_threshold_ms,
        }
    }

    /// Registers user activity at `now`.
    ///
    /// The elapsed gap goes to `idle_duration` when it exceeds the idle
    /// threshold, otherwise to `active_duration`. A clock that moves
    /// backwards contributes nothing, keeping both counters monotone.
    pub fn touch(&mut self, now: Timestamp) {
        let elapsed = now.millis_since(&self.last_activity).max(0) as u64;
        if elapsed > self.idle_threshold_ms {
            self.session.idle_duration += elapsed;
        } else {
            self.session.active_duration += elapsed;
        }
        self.last_activity = now;
    }

    /// Marks the session ended at `now`.
    ///
    /// Non-terminal: called on visibility loss and again at teardown. The
    /// session keeps accumulating if activity continues afterwards.
    pub fn pause(&mut self, now: Timestamp) {
        self.session.session_end = Some(now);
    }

    /// Restarts activity accounting after a pause.
    ///
    /// Only the activity anchor resets; accumulated durations and the
    /// provisional `session_end` are left as they are.
    pub fn resume(&mut self, now: Timestamp) {
        self.last_activity = now;
    }

    /// Appends a completed module to the session.
    pub fn record_completion(&mut self, module_id: ModuleId) {
        self.session.modules_completed.push(module_id);
    }

    /// Overwrites the session's running average score.
    pub fn set_average_score(&mut self, average: f64) {
        self.session.average_score = average;
    }

    /// The current session record.
    pub fn session(&self) -> &SessionAnalytics {
        &self.session
    }

    /// The current session's identifier.
    pub fn session_id(&self) -> SessionId {
        self.session.session_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_at(millis: i64) -> SessionTracker {
        SessionTracker::new(Timestamp::from_millis(millis), DEFAULT_IDLE_THRESHOLD_MS)
    }

    #[test]
    fn short_gaps_accumulate_as_active_time() {
        let mut tracker = tracker_at(0);
        tracker.touch(Timestamp::from_millis(5_000));
        tracker.touch(Timestamp::from_millis(12_000));

        assert_eq!(tracker.session().active_duration, 12_000);
        assert_eq!(tracker.session().idle_duration, 0);
    }

    #[test]
    fn long_gaps_accumulate_as_idle_time() {
        let mut tracker = tracker_at(0);
        tracker.touch(Timestamp::from_millis(45_000));

        assert_eq!(tracker.session().active_duration, 0);
        assert_eq!(tracker.session().idle_duration, 45_000);
    }

    #[test]
    fn threshold_gap_counts_as_active() {
        // Exactly the threshold is still engagement; one past it is idle.
        let mut tracker = tracker_at(0);
        tracker.touch(Timestamp::from_millis(30_000));
        assert_eq!(tracker.session().active_duration, 30_000);

        tracker.touch(Timestamp::from_millis(60_001));
        assert_eq!(tracker.session().idle_duration, 30_001);
    }

    #[test]
    fn backwards_clock_contributes_nothing() {
        let mut tracker = tracker_at(10_000);
        tracker.touch(Timestamp::from_millis(4_000));

        assert_eq!(tracker.session().active_duration, 0);
        assert_eq!(tracker.session().idle_duration, 0);

        // The anchor still moved, so the next gap measures from 4000.
        tracker.touch(Timestamp::from_millis(6_000));
        assert_eq!(tracker.session().active_duration, 2_000);
    }

    #[test]
    fn pause_sets_end_without_stopping_accounting() {
        let mut tracker = tracker_at(0);
        tracker.touch(Timestamp::from_millis(1_000));
        tracker.pause(Timestamp::from_millis(2_000));

        assert_eq!(
            tracker.session().session_end,
            Some(Timestamp::from_millis(2_000))
        );
        assert_eq!(tracker.session().active_duration, 1_000);
    }

    #[test]
    fn resume_resets_anchor_but_keeps_provisional_end() {
        let mut tracker = tracker_at(0);
        tracker.pause(Timestamp::from_millis(2_000));
        tracker.resume(Timestamp::from_millis(120_000));

        // The pause gap is not attributed to either counter.
        tracker.touch(Timestamp::from_millis(121_000));
        assert_eq!(tracker.session().active_duration, 1_000);
        assert_eq!(tracker.session().idle_duration, 0);

        // The provisional end survives the resume.
        assert_eq!(
            tracker.session().session_end,
            Some(Timestamp::from_millis(2_000))
        );
    }

    #[test]
    fn completions_append_in_order() {
        let mut tracker = tracker_at(0);
        tracker.record_completion(ModuleId::new("m1"));
        tracker.record_completion(ModuleId::new("m2"));
        tracker.record_completion(ModuleId::new("m1"));

        assert_eq!(
            tracker.session().modules_completed,
            vec![
                ModuleId::new("m1"),
                ModuleId::new("m2"),
                ModuleId::new("m1")
            ]
        );
    }
}
