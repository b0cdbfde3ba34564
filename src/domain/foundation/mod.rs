//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the analytics domain.

mod errors;
mod ids;
mod mastery;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{CaseId, DecisionId, ModuleId, SessionId, UserId};
pub use mastery::Mastery;
pub use timestamp::Timestamp;
