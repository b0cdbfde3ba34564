//! Timestamp value object for immutable points in time.
//!
//! Serialized as integer epoch milliseconds, the format the metric wire
//! protocol and the durable store use.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(#[serde(with = "chrono::serde::ts_milliseconds")] DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Creates a timestamp from epoch milliseconds.
    ///
    /// Values outside chrono's representable range clamp to the range floor.
    pub fn from_millis(millis: i64) -> Self {
        Self(DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::MIN_UTC))
    }

    /// Returns the timestamp as epoch milliseconds.
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the milliseconds elapsed from `earlier` to this timestamp.
    ///
    /// Negative if `earlier` is actually later.
    pub fn millis_since(&self, earlier: &Timestamp) -> i64 {
        self.0
            .signed_duration_since(earlier.0)
            .num_milliseconds()
    }

    /// Creates a new timestamp offset by the specified number of milliseconds.
    pub fn plus_millis(&self, millis: i64) -> Self {
        Self(self.0 + Duration::milliseconds(millis))
    }

    /// Returns the UTC hour of day, 0-23.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the UTC calendar date as `YYYY-MM-DD`, the trend bucket key.
    pub fn date_key(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}
