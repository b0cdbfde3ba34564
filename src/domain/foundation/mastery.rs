//! Mastery value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Accumulated skill level for one module, between 0 and 100 inclusive.
///
/// Moves up by [`Mastery::GAIN`] on a correct decision and down by
/// [`Mastery::DECAY`] on an incorrect one, clamped at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mastery(u8);

impl Mastery {
    /// No demonstrated mastery, the prior for an unseen module.
    pub const ZERO: Self = Self(0);

    /// Full mastery.
    pub const HUNDRED: Self = Self(100);

    /// Points gained per correct decision.
    pub const GAIN: u8 = 5;

    /// Points lost per incorrect decision.
    pub const DECAY: u8 = 3;

    /// Modules at or above this level count as strong areas.
    pub const STRONG_THRESHOLD: u8 = 80;

    /// Modules below this level count as weak areas.
    pub const WEAK_THRESHOLD: u8 = 50;

    /// Creates a new Mastery, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Mastery, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range(
                "mastery",
                0,
                100,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Applies one decision outcome, clamped to [0,100].
    pub fn apply(self, is_correct: bool) -> Self {
        if is_correct {
            Self((self.0 + Self::GAIN).min(100))
        } else {
            Self(self.0.saturating_sub(Self::DECAY))
        }
    }

    /// True at or above the strong-area threshold.
    pub fn is_strong(&self) -> bool {
        self.0 >= Self::STRONG_THRESHOLD
    }

    /// True below the weak-area threshold.
    pub fn is_weak(&self) -> bool {
        self.0 < Self::WEAK_THRESHOLD
    }
}

impl Default for Mastery {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Mastery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
