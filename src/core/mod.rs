pub mod context;
pub mod decision;
pub mod types;

pub use context::ThresholdContext;
pub use decision::ThresholdDecision;
pub use types::{CriticalityLevel, ProjectPhase, TaskCategory, MAX_THRESHOLD, MIN_THRESHOLD};
