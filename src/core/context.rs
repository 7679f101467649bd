//! Operational signals a caller can attach to a threshold request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Recent-reliability signals plus any free-form flags the caller wants
/// preserved in the ledger.
///
/// Unknown keys are kept in `extra` so they round-trip into the recorded
/// decision's `context_flags` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdContext {
    /// Identifiers of recent failures (test runs, builds, rejected tasks)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recent_failures: Vec<String>,

    /// Fraction of recent tasks that passed, in `[0.0, 1.0]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_success_rate: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ThresholdContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure(mut self, failure: impl Into<String>) -> Self {
        self.recent_failures.push(failure.into());
        self
    }

    pub fn with_success_rate(mut self, rate: f64) -> Self {
        self.recent_success_rate = Some(rate);
        self
    }

    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// True when the system has been unreliable lately: any recorded failure,
    /// or a success rate under `success_rate_floor`.
    pub fn has_recent_failures(&self, success_rate_floor: f64) -> bool {
        !self.recent_failures.is_empty()
            || self
                .recent_success_rate
                .is_some_and(|rate| rate < success_rate_floor)
    }

    /// JSON object form stored as `context_flags` on a decision
    pub fn to_flags(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}
