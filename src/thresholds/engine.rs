use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::calculator::{ThresholdBreakdown, ThresholdCalculator};
use super::rationale::{QualityTier, RationaleGenerator};
use super::resolver::{ContextResolver, ThresholdRequest};
use crate::config::{QualityBarConfig, ThresholdCatalog};
use crate::core::{TaskCategory, ThresholdDecision};
use crate::errors::LedgerError;
use crate::ledger::{DecisionLedger, LedgerStatistics, StatisticsReport};

/// Threshold plus the reasoning behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdExplanation {
    pub threshold: u32,
    pub base_threshold: u32,
    /// Task type as the caller supplied it
    pub task_type: String,
    /// Category the task type resolved to
    pub category: TaskCategory,
    pub tier: QualityTier,
    pub explanation: Vec<String>,
    pub rationale: String,
}

/// Context-sensitive quality bar.
///
/// Computes thresholds from an immutable catalog and, when a ledger is
/// attached, records every decision on a best-effort basis.
///
/// ```rust
/// use qualitybar::thresholds::{AdaptiveQualityThresholds, ThresholdRequest};
/// use qualitybar::config::ThresholdCatalog;
///
/// let engine = AdaptiveQualityThresholds::without_history(ThresholdCatalog::default());
/// let bar = engine.get_threshold(&ThresholdRequest::new("documentation"));
/// assert_eq!(bar, 70);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveQualityThresholds {
    catalog: ThresholdCatalog,
    ledger: Option<DecisionLedger>,
}

impl AdaptiveQualityThresholds {
    /// Default catalog, recording into `storage_dir`
    pub fn new(storage_dir: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let ledger = DecisionLedger::open(storage_dir)?;
        Ok(Self::with_ledger(ThresholdCatalog::default(), ledger))
    }

    /// Build from loaded configuration. History settings decide whether a
    /// ledger is opened and where.
    ///
    /// A ledger that cannot be opened only costs the audit trail: the engine
    /// falls back to computing without history.
    pub fn from_config(config: &QualityBarConfig) -> Self {
        let catalog = config.effective_catalog();
        if !config.history.enabled {
            return Self::without_history(catalog);
        }

        match DecisionLedger::open(&config.history.storage_dir) {
            Ok(ledger) => {
                Self::with_ledger(catalog, ledger.with_max_entries(config.history.max_entries))
            }
            Err(e) => {
                tracing::warn!("Decision history disabled: {}", e);
                Self::without_history(catalog)
            }
        }
    }

    pub fn with_ledger(catalog: ThresholdCatalog, ledger: DecisionLedger) -> Self {
        Self {
            catalog,
            ledger: Some(ledger),
        }
    }

    /// Pure engine that records nothing
    pub fn without_history(catalog: ThresholdCatalog) -> Self {
        Self {
            catalog,
            ledger: None,
        }
    }

    pub fn catalog(&self) -> &ThresholdCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> Option<&DecisionLedger> {
        self.ledger.as_ref()
    }

    /// Resolve and calculate without touching the ledger
    pub fn compute(&self, request: &ThresholdRequest) -> ThresholdBreakdown {
        let resolved = ContextResolver::new(self.catalog.success_rate_floor).resolve(request);
        ThresholdCalculator::new(&self.catalog).calculate(&resolved)
    }

    /// Threshold in `[MIN_THRESHOLD, MAX_THRESHOLD]` for `request`.
    pub fn get_threshold(&self, request: &ThresholdRequest) -> u32 {
        let breakdown = self.compute(request);
        self.record(request, &breakdown);
        breakdown.threshold
    }

    /// Same number as [`get_threshold`](Self::get_threshold), with the factors
    /// that produced it.
    pub fn get_threshold_with_explanation(&self, request: &ThresholdRequest) -> ThresholdExplanation {
        let breakdown = self.compute(request);
        self.record(request, &breakdown);
        explain(request, &breakdown)
    }

    /// Aggregate view of the ledger. Without a ledger this is always empty.
    pub fn get_statistics(&self) -> StatisticsReport {
        match &self.ledger {
            Some(ledger) => ledger.get_statistics(),
            None => StatisticsReport::Available(LedgerStatistics::empty()),
        }
    }

    fn record(&self, request: &ThresholdRequest, breakdown: &ThresholdBreakdown) {
        let Some(ledger) = &self.ledger else {
            return;
        };

        tracing::debug!(
            task_type = %request.task_type,
            threshold = breakdown.threshold,
            "Recording threshold decision"
        );
        ledger.record(decision_for(request, breakdown));
    }
}

// Pure functions

pub fn explain(request: &ThresholdRequest, breakdown: &ThresholdBreakdown) -> ThresholdExplanation {
    ThresholdExplanation {
        threshold: breakdown.threshold,
        base_threshold: breakdown.base_threshold,
        task_type: request.task_type.clone(),
        category: breakdown.category,
        tier: QualityTier::from_threshold(breakdown.threshold),
        explanation: RationaleGenerator::explanation(breakdown),
        rationale: RationaleGenerator::rationale(breakdown.threshold, breakdown.category),
    }
}

fn decision_for(request: &ThresholdRequest, breakdown: &ThresholdBreakdown) -> ThresholdDecision {
    ThresholdDecision {
        threshold: breakdown.threshold,
        base_threshold: breakdown.base_threshold,
        task_type: request.task_type.clone(),
        project_phase: request.project_phase.clone(),
        criticality: request.criticality.clone(),
        is_user_facing: request.is_user_facing,
        context_flags: request
            .context
            .as_ref()
            .map(|ctx| ctx.to_flags())
            .unwrap_or_else(|| serde_json::json!({})),
        timestamp: Utc::now(),
    }
}
