//! Pattern module - Adaptive learning model per user.

mod engine;
pub mod stats;

pub use engine::{LearningPattern, PatternEngine, VELOCITY_WINDOW};
