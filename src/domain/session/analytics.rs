//! Session analytics record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ModuleId, SessionId, Timestamp};

/// One continuous usage window.
///
/// Created when the engine initializes and mutated by the tracker on every
/// activity signal. `session_end` stays unset while the session is open;
/// pausing sets it without stopping the session, so a resumed session keeps
/// its provisional end until the next pause or teardown overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAnalytics {
    pub session_id: SessionId,
    pub session_start: Timestamp,
    /// Serialized as 0 while the session is open.
    #[serde(with = "session_end_repr")]
    pub session_end: Option<Timestamp>,
    /// Milliseconds of engaged time.
    pub active_duration: u64,
    /// Milliseconds attributed to idle gaps.
    pub idle_duration: u64,
    /// Modules completed during this session, in completion order.
    pub modules_completed: Vec<ModuleId>,
    /// Mean score of the session's metrics at the last completion.
    pub average_score: f64,
}

impl SessionAnalytics {
    /// Creates an open session starting at `started_at`.
    pub fn new(session_id: SessionId, started_at: Timestamp) -> Self {
        Self {
            session_id,
            session_start: started_at,
            session_end: None,
            active_duration: 0,
            idle_duration: 0,
            modules_completed: Vec::new(),
            average_score: 0.0,
        }
    }

    /// True until the session is first paused or ended.
    pub fn is_open(&self) -> bool {
        self.session_end.is_none()
    }
}

mod session_end_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::domain::foundation::Timestamp;

    pub fn serialize<S>(end: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(end.map_or(0, |t| t.as_millis()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        Ok((millis != 0).then(|| Timestamp::from_millis(millis)))
    }
}
