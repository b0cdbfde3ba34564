//! Clock adapters.
//!
//! `SystemClock` reads the wall clock; `ManualClock` lets tests drive
//! time forward deterministically.

use std::sync::Mutex;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Test clock that only moves when told to.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned, which only happens
/// if another test thread panicked while holding it.
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    /// Creates a clock frozen at the given instant.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward by the given number of milliseconds.
    pub fn advance(&self, millis: i64) {
        let mut now = self.now.lock().expect("ManualClock: now lock poisoned");
        *now = now.plus_millis(millis);
    }

    /// Jumps the clock to the given instant.
    pub fn set(&self, now: Timestamp) {
        *self.now.lock().expect("ManualClock: now lock poisoned") = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().expect("ManualClock: now lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_stays_put_until_advanced() {
        let clock = ManualClock::new(Timestamp::from_millis(1_000));

        assert_eq!(clock.now().as_millis(), 1_000);
        assert_eq!(clock.now().as_millis(), 1_000);

        clock.advance(500);
        assert_eq!(clock.now().as_millis(), 1_500);
    }

    #[test]
    fn manual_clock_can_jump() {
        let clock = ManualClock::new(Timestamp::from_millis(1_000));

        clock.set(Timestamp::from_millis(99_000));

        assert_eq!(clock.now().as_millis(), 99_000);
    }

    #[test]
    fn system_clock_is_monotonic_enough_for_ordering() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();

        assert!(!second.is_before(&first));
    }
}
