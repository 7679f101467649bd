//! Threshold computation: resolve the request, run the calculator, explain
//! the result, and record the decision.
//!
//! ```text
//! ThresholdRequest -> ContextResolver -> ThresholdCalculator -> RationaleGenerator
//!                                                   |
//!                                                   +-> DecisionLedger (best effort)
//! ```

pub mod calculator;
pub mod engine;
pub mod rationale;
pub mod resolver;

pub use calculator::{Adjustment, ThresholdBreakdown, ThresholdCalculator};
pub use engine::{AdaptiveQualityThresholds, ThresholdExplanation};
pub use rationale::{QualityTier, RationaleGenerator};
pub use resolver::{ContextResolver, ResolvedContext, ThresholdRequest};
