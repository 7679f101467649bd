use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One computed threshold, as persisted in the ledger.
///
/// Inputs are stored exactly as the caller supplied them so the audit trail
/// shows what was asked, not what it normalized to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdDecision {
    pub threshold: u32,
    pub base_threshold: u32,
    pub task_type: String,
    #[serde(default)]
    pub project_phase: Option<String>,
    #[serde(default)]
    pub criticality: Option<String>,
    #[serde(default)]
    pub is_user_facing: bool,
    #[serde(default)]
    pub context_flags: Value,
    pub timestamp: DateTime<Utc>,
}
