//! Threshold arithmetic.
//!
//! Steps run in a fixed order because each one operates on the running
//! total left by the previous step:
//!
//! 1. base threshold for the task category
//! 2. phase multiplier (when a phase was supplied)
//! 3. criticality adjustment (when a criticality was supplied)
//! 4. user-facing bonus
//! 5. recent-failure escalation
//! 6. clamp into `[MIN_THRESHOLD, MAX_THRESHOLD]`
//! 7. round half away from zero

use serde::Serialize;
use std::fmt;

use super::resolver::ResolvedContext;
use crate::config::ThresholdCatalog;
use crate::core::{CriticalityLevel, ProjectPhase, TaskCategory, MAX_THRESHOLD, MIN_THRESHOLD};

/// One factor applied on top of the base threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adjustment {
    Phase {
        phase: ProjectPhase,
        multiplier: f64,
    },
    Criticality {
        level: CriticalityLevel,
        delta: f64,
    },
    UserFacing {
        bonus: f64,
    },
    RecentFailures {
        escalation: f64,
    },
    /// Running total fell outside the valid range and was pulled back in
    Clamped {
        from: f64,
        to: f64,
    },
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::Phase { phase, multiplier } => {
                write!(f, "Project phase '{}': x{:.2}", phase, multiplier)
            }
            Adjustment::Criticality { level, delta } => {
                write!(f, "Criticality '{}': {}", level, signed(*delta))
            }
            Adjustment::UserFacing { bonus } => {
                write!(f, "User-facing change: {}", signed(*bonus))
            }
            Adjustment::RecentFailures { escalation } => {
                write!(f, "Recent failures detected: {}", signed(*escalation))
            }
            Adjustment::Clamped { from, to } => {
                write!(f, "Clamped {:.1} to {:.0}", from, to)
            }
        }
    }
}

fn signed(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:+}", value as i64)
    } else {
        format!("{:+.1}", value)
    }
}

/// Everything the calculator did to reach a threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdBreakdown {
    pub category: TaskCategory,
    pub base_threshold: u32,
    /// Applied factors, in application order
    pub adjustments: Vec<Adjustment>,
    /// Running total before clamping
    pub unclamped: f64,
    pub threshold: u32,
}

/// Pure function of a resolved request and the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdCalculator<'a> {
    catalog: &'a ThresholdCatalog,
}

impl<'a> ThresholdCalculator<'a> {
    pub fn new(catalog: &'a ThresholdCatalog) -> Self {
        Self { catalog }
    }

    pub fn calculate(&self, ctx: &ResolvedContext) -> ThresholdBreakdown {
        let base_threshold = self.catalog.base_threshold(ctx.category);
        let mut adjustments = Vec::new();
        let mut result = base_threshold as f64;

        if let Some(phase) = ctx.phase {
            let multiplier = self.catalog.phase_multiplier(phase);
            result *= multiplier;
            adjustments.push(Adjustment::Phase { phase, multiplier });
        }

        if let Some(level) = ctx.criticality {
            let delta = self.catalog.criticality_adjustment(level);
            result += delta;
            adjustments.push(Adjustment::Criticality { level, delta });
        }

        if ctx.is_user_facing {
            let bonus = self.catalog.user_facing_bonus;
            result += bonus;
            adjustments.push(Adjustment::UserFacing { bonus });
        }

        if ctx.has_recent_failures {
            let escalation = self.catalog.failure_escalation;
            result += escalation;
            adjustments.push(Adjustment::RecentFailures { escalation });
        }

        let clamped = clamp_threshold(result);
        if clamped != result {
            adjustments.push(Adjustment::Clamped {
                from: result,
                to: clamped,
            });
        }

        ThresholdBreakdown {
            category: ctx.category,
            base_threshold,
            adjustments,
            unclamped: result,
            threshold: round_threshold(clamped),
        }
    }
}

/// Clamp into the valid range. NaN maps to the floor.
pub fn clamp_threshold(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_THRESHOLD as f64;
    }
    value.clamp(MIN_THRESHOLD as f64, MAX_THRESHOLD as f64)
}

/// Round an already clamped value to the nearest integer
pub fn round_threshold(clamped: f64) -> u32 {
    // In range after clamping, so the cast cannot truncate
    clamped.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(category: TaskCategory) -> ResolvedContext {
        ResolvedContext {
            category,
            phase: None,
            criticality: None,
            is_user_facing: false,
            has_recent_failures: false,
        }
    }

    #[test]
    fn test_base_only() {
        let catalog = ThresholdCatalog::default();
        let breakdown = ThresholdCalculator::new(&catalog).calculate(&ctx(TaskCategory::Feature));

        assert_eq!(breakdown.base_threshold, 80);
        assert_eq!(breakdown.threshold, 80);
        assert!(breakdown.adjustments.is_empty());
    }

    #[test]
    fn test_full_escalation_hits_ceiling() {
        let catalog = ThresholdCatalog::default();
        let breakdown = ThresholdCalculator::new(&catalog).calculate(&ResolvedContext {
            category: TaskCategory::Security,
            phase: Some(ProjectPhase::PreRelease),
            criticality: Some(CriticalityLevel::Critical),
            is_user_facing: true,
            has_recent_failures: true,
        });

        assert_eq!(breakdown.threshold, 100);
        assert_eq!(breakdown.base_threshold, 95);
        assert!(breakdown.unclamped > 100.0);
        assert!(matches!(
            breakdown.adjustments.last(),
            Some(Adjustment::Clamped { to, .. }) if *to == 100.0
        ));
    }

    #[test]
    fn test_adjustment_order_is_fixed() {
        let catalog = ThresholdCatalog::default();
        let breakdown = ThresholdCalculator::new(&catalog).calculate(&ResolvedContext {
            category: TaskCategory::Feature,
            phase: Some(ProjectPhase::PreRelease),
            criticality: Some(CriticalityLevel::High),
            is_user_facing: true,
            has_recent_failures: false,
        });

        // (80 * 1.1) + 5 + 5 = 98
        assert_eq!(breakdown.threshold, 98);
        assert_eq!(
            breakdown.adjustments,
            vec![
                Adjustment::Phase {
                    phase: ProjectPhase::PreRelease,
                    multiplier: 1.1
                },
                Adjustment::Criticality {
                    level: CriticalityLevel::High,
                    delta: 5.0
                },
                Adjustment::UserFacing { bonus: 5.0 },
            ]
        );
    }

    #[test]
    fn test_floor_clamp() {
        let catalog = ThresholdCatalog::default();
        let breakdown = ThresholdCalculator::new(&catalog).calculate(&ResolvedContext {
            category: TaskCategory::Prototype,
            phase: Some(ProjectPhase::Exploration),
            criticality: Some(CriticalityLevel::Trivial),
            is_user_facing: false,
            has_recent_failures: false,
        });

        assert_eq!(breakdown.threshold, MIN_THRESHOLD);
        assert!(breakdown.unclamped < MIN_THRESHOLD as f64);
    }

    #[test]
    fn test_rounding_after_multiplier() {
        let catalog = ThresholdCatalog::default();
        let mut request = ctx(TaskCategory::Bugfix);
        request.phase = Some(ProjectPhase::Exploration);

        // 85 * 0.85 = 72.25
        let breakdown = ThresholdCalculator::new(&catalog).calculate(&request);
        assert_eq!(breakdown.threshold, 72);
    }

    #[test]
    fn test_clamp_threshold_handles_nan() {
        assert_eq!(clamp_threshold(f64::NAN), MIN_THRESHOLD as f64);
        assert_eq!(clamp_threshold(f64::INFINITY), MAX_THRESHOLD as f64);
    }

    #[test]
    fn test_adjustment_descriptions() {
        assert_eq!(
            Adjustment::Criticality {
                level: CriticalityLevel::Trivial,
                delta: -10.0
            }
            .to_string(),
            "Criticality 'trivial': -10"
        );
        assert_eq!(
            Adjustment::Phase {
                phase: ProjectPhase::PreRelease,
                multiplier: 1.1
            }
            .to_string(),
            "Project phase 'pre-release': x1.10"
        );
        assert_eq!(
            Adjustment::UserFacing { bonus: 2.5 }.to_string(),
            "User-facing change: +2.5"
        );
    }
}
