// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod observability;
pub mod output;
pub mod thresholds;

// Re-export commonly used types
pub use crate::core::{
    CriticalityLevel, ProjectPhase, TaskCategory, ThresholdContext, ThresholdDecision,
    MAX_THRESHOLD, MIN_THRESHOLD,
};

pub use crate::config::{HistoryConfig, PresetLevel, QualityBarConfig, ThresholdCatalog};

pub use crate::errors::{ConfigError, LedgerError};

pub use crate::ledger::{DecisionLedger, LedgerStatistics, StatisticsReport};

pub use crate::thresholds::{
    AdaptiveQualityThresholds, ThresholdBreakdown, ThresholdExplanation, ThresholdRequest,
};
