//! Aggregates derived from the ledger on demand. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::store::LedgerFile;
use crate::core::ThresholdDecision;
use crate::thresholds::resolver::match_task_category;

/// Summary of every recorded decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerStatistics {
    pub total_decisions: usize,
    /// Zero when there are no decisions
    pub average_threshold: f64,
    pub min_threshold: Option<u32>,
    pub max_threshold: Option<u32>,
    /// Canonical category name; ties go to the one recorded first
    pub most_common_task_type: Option<String>,
    #[serde(default)]
    pub adjustments_applied: u64,
    #[serde(default)]
    pub decisions_by_task_type: BTreeMap<String, usize>,
}

impl LedgerStatistics {
    pub fn empty() -> Self {
        Self {
            total_decisions: 0,
            average_threshold: 0.0,
            min_threshold: None,
            max_threshold: None,
            most_common_task_type: None,
            adjustments_applied: 0,
            decisions_by_task_type: BTreeMap::new(),
        }
    }

    pub fn from_ledger(ledger: &LedgerFile) -> Self {
        Self {
            adjustments_applied: ledger.adjustments_applied,
            ..Self::from_decisions(&ledger.threshold_history)
        }
    }

    pub fn from_decisions(decisions: &[ThresholdDecision]) -> Self {
        if decisions.is_empty() {
            return Self::empty();
        }

        let thresholds = decisions.iter().map(|d| d.threshold);
        let total: u64 = thresholds.clone().map(u64::from).sum();

        Self {
            total_decisions: decisions.len(),
            average_threshold: total as f64 / decisions.len() as f64,
            min_threshold: thresholds.clone().min(),
            max_threshold: thresholds.max(),
            most_common_task_type: most_common_task_type(decisions),
            adjustments_applied: decisions.len() as u64,
            decisions_by_task_type: count_by_task_type(decisions),
        }
    }
}

/// Category a recorded task type resolves to. Unrecognized names fall back
/// the same way they did when the threshold was computed.
fn category_of(decision: &ThresholdDecision) -> &'static str {
    match_task_category(&decision.task_type)
        .unwrap_or_default()
        .as_str()
}

fn count_by_task_type(decisions: &[ThresholdDecision]) -> BTreeMap<String, usize> {
    decisions.iter().fold(BTreeMap::new(), |mut counts, d| {
        *counts.entry(category_of(d).to_string()).or_insert(0) += 1;
        counts
    })
}

fn most_common_task_type(decisions: &[ThresholdDecision]) -> Option<String> {
    // (count, first index seen) per category
    let mut seen: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, decision) in decisions.iter().enumerate() {
        seen.entry(category_of(decision))
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, index));
    }

    seen.into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(category, _)| category.to_string())
}

/// Result of a statistics request that never fails from the caller's side.
///
/// Serializes either as the plain statistics object or as `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatisticsReport {
    Available(LedgerStatistics),
    Unavailable { error: String },
}

impl StatisticsReport {
    pub fn statistics(&self) -> Option<&LedgerStatistics> {
        match self {
            StatisticsReport::Available(stats) => Some(stats),
            StatisticsReport::Unavailable { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            StatisticsReport::Available(_) => None,
            StatisticsReport::Unavailable { error } => Some(error),
        }
    }
}
