//! Human-readable explanation of a computed threshold.
//!
//! Presentation only: everything here reads the final, clamped number and
//! never feeds back into it.

use serde::{Deserialize, Serialize};

use super::calculator::ThresholdBreakdown;
use crate::core::TaskCategory;

/// Qualitative band a final threshold falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Relaxed,
    Standard,
    High,
    VeryHigh,
}

impl QualityTier {
    pub fn from_threshold(threshold: u32) -> Self {
        match threshold {
            t if t >= 90 => QualityTier::VeryHigh,
            t if t >= 80 => QualityTier::High,
            t if t >= 70 => QualityTier::Standard,
            _ => QualityTier::Relaxed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QualityTier::VeryHigh => "Very high standards",
            QualityTier::High => "High quality standards",
            QualityTier::Standard => "Standard quality requirements",
            QualityTier::Relaxed => "Relaxed standards",
        }
    }
}

pub struct RationaleGenerator;

impl RationaleGenerator {
    /// Templated sentence for the tier `threshold` lands in
    pub fn rationale(threshold: u32, category: TaskCategory) -> String {
        let tier = QualityTier::from_threshold(threshold);
        let verb = match tier {
            QualityTier::VeryHigh => "required for",
            QualityTier::High => "expected for",
            QualityTier::Standard => "for",
            QualityTier::Relaxed => "acceptable for",
        };
        format!("{} {} {} work", tier.label(), verb, category)
    }

    /// Ordered factor descriptions, starting from the base value
    pub fn explanation(breakdown: &ThresholdBreakdown) -> Vec<String> {
        std::iter::once(format!(
            "Base threshold for {}: {}",
            breakdown.category, breakdown.base_threshold
        ))
        .chain(breakdown.adjustments.iter().map(ToString::to_string))
        .collect()
    }
}
