//! Clock port - Time source abstraction.
//!
//! Everything time-dependent (activity classification, timestamps, flush
//! envelopes) reads through this port so tests can drive time manually.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time.
pub trait Clock: Send + Sync {
    /// The current moment.
    fn now(&self) -> Timestamp;
}
