use serde::{Deserialize, Serialize};

use crate::core::{CriticalityLevel, ProjectPhase, TaskCategory, MAX_THRESHOLD, MIN_THRESHOLD};
use crate::errors::ConfigError;

/// Base threshold per task category.
///
/// One field per [`TaskCategory`] variant; lookups go through an exhaustive
/// match so a new category cannot ship without a base value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseThresholds {
    #[serde(default = "default_security")]
    pub security: u32,
    #[serde(default = "default_bugfix")]
    pub bugfix: u32,
    #[serde(default = "default_feature")]
    pub feature: u32,
    #[serde(default = "default_refactoring")]
    pub refactoring: u32,
    #[serde(default = "default_performance")]
    pub performance: u32,
    #[serde(default = "default_testing")]
    pub testing: u32,
    #[serde(default = "default_infrastructure")]
    pub infrastructure: u32,
    #[serde(default = "default_documentation")]
    pub documentation: u32,
    #[serde(default = "default_exploratory")]
    pub exploratory: u32,
    #[serde(default = "default_prototype")]
    pub prototype: u32,
}

impl Default for BaseThresholds {
    fn default() -> Self {
        Self {
            security: default_security(),
            bugfix: default_bugfix(),
            feature: default_feature(),
            refactoring: default_refactoring(),
            performance: default_performance(),
            testing: default_testing(),
            infrastructure: default_infrastructure(),
            documentation: default_documentation(),
            exploratory: default_exploratory(),
            prototype: default_prototype(),
        }
    }
}

impl BaseThresholds {
    pub fn get(&self, category: TaskCategory) -> u32 {
        match category {
            TaskCategory::Security => self.security,
            TaskCategory::Bugfix => self.bugfix,
            TaskCategory::Feature => self.feature,
            TaskCategory::Refactoring => self.refactoring,
            TaskCategory::Performance => self.performance,
            TaskCategory::Testing => self.testing,
            TaskCategory::Infrastructure => self.infrastructure,
            TaskCategory::Documentation => self.documentation,
            TaskCategory::Exploratory => self.exploratory,
            TaskCategory::Prototype => self.prototype,
        }
    }

    fn get_mut(&mut self, category: TaskCategory) -> &mut u32 {
        match category {
            TaskCategory::Security => &mut self.security,
            TaskCategory::Bugfix => &mut self.bugfix,
            TaskCategory::Feature => &mut self.feature,
            TaskCategory::Refactoring => &mut self.refactoring,
            TaskCategory::Performance => &mut self.performance,
            TaskCategory::Testing => &mut self.testing,
            TaskCategory::Infrastructure => &mut self.infrastructure,
            TaskCategory::Documentation => &mut self.documentation,
            TaskCategory::Exploratory => &mut self.exploratory,
            TaskCategory::Prototype => &mut self.prototype,
        }
    }

    /// Shift every base value by `delta`, saturating into the valid range
    pub fn shifted(mut self, delta: i32) -> Self {
        for category in TaskCategory::ALL {
            let slot = self.get_mut(category);
            let moved = (*slot as i64 + delta as i64)
                .clamp(MIN_THRESHOLD as i64, MAX_THRESHOLD as i64);
            *slot = moved as u32;
        }
        self
    }
}

fn default_security() -> u32 {
    95
}
fn default_bugfix() -> u32 {
    85
}
fn default_feature() -> u32 {
    80
}
fn default_refactoring() -> u32 {
    80
}
fn default_performance() -> u32 {
    85
}
fn default_testing() -> u32 {
    85
}
fn default_infrastructure() -> u32 {
    85
}
fn default_documentation() -> u32 {
    70
}
fn default_exploratory() -> u32 {
    65
}
fn default_prototype() -> u32 {
    60
}

/// Multiplicative factor per project phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseMultipliers {
    #[serde(default = "default_development_multiplier")]
    pub development: f64,
    #[serde(default = "default_pre_release_multiplier")]
    pub pre_release: f64,
    #[serde(default = "default_maintenance_multiplier")]
    pub maintenance: f64,
    #[serde(default = "default_exploration_multiplier")]
    pub exploration: f64,
}

impl Default for PhaseMultipliers {
    fn default() -> Self {
        Self {
            development: default_development_multiplier(),
            pre_release: default_pre_release_multiplier(),
            maintenance: default_maintenance_multiplier(),
            exploration: default_exploration_multiplier(),
        }
    }
}

impl PhaseMultipliers {
    pub fn get(&self, phase: ProjectPhase) -> f64 {
        match phase {
            ProjectPhase::Development => self.development,
            ProjectPhase::PreRelease => self.pre_release,
            ProjectPhase::Maintenance => self.maintenance,
            ProjectPhase::Exploration => self.exploration,
        }
    }
}

fn default_development_multiplier() -> f64 {
    1.0
}
fn default_pre_release_multiplier() -> f64 {
    1.1
}
fn default_maintenance_multiplier() -> f64 {
    1.0
}
fn default_exploration_multiplier() -> f64 {
    0.85
}

/// Additive adjustment per criticality level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalityAdjustments {
    #[serde(default = "default_critical_adjustment")]
    pub critical: f64,
    #[serde(default = "default_high_adjustment")]
    pub high: f64,
    #[serde(default = "default_medium_adjustment")]
    pub medium: f64,
    #[serde(default = "default_low_adjustment")]
    pub low: f64,
    #[serde(default = "default_trivial_adjustment")]
    pub trivial: f64,
}

impl Default for CriticalityAdjustments {
    fn default() -> Self {
        Self {
            critical: default_critical_adjustment(),
            high: default_high_adjustment(),
            medium: default_medium_adjustment(),
            low: default_low_adjustment(),
            trivial: default_trivial_adjustment(),
        }
    }
}

impl CriticalityAdjustments {
    pub fn get(&self, level: CriticalityLevel) -> f64 {
        match level {
            CriticalityLevel::Critical => self.critical,
            CriticalityLevel::High => self.high,
            CriticalityLevel::Medium => self.medium,
            CriticalityLevel::Low => self.low,
            CriticalityLevel::Trivial => self.trivial,
        }
    }
}

fn default_critical_adjustment() -> f64 {
    10.0
}
fn default_high_adjustment() -> f64 {
    5.0
}
fn default_medium_adjustment() -> f64 {
    0.0
}
fn default_low_adjustment() -> f64 {
    -5.0
}
fn default_trivial_adjustment() -> f64 {
    -10.0
}

/// Static data the calculator reads: base values, phase and criticality
/// factors, and the fixed user-facing and recent-failure modifiers.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCatalog {
    #[serde(default)]
    pub base: BaseThresholds,

    #[serde(default)]
    pub phases: PhaseMultipliers,

    #[serde(default)]
    pub criticality: CriticalityAdjustments,

    /// Added when the change is visible to end users
    #[serde(default = "default_user_facing_bonus")]
    pub user_facing_bonus: f64,

    /// Added when the context reports recent failures
    #[serde(default = "default_failure_escalation")]
    pub failure_escalation: f64,

    /// Success rates strictly below this count as recent failure
    #[serde(default = "default_success_rate_floor")]
    pub success_rate_floor: f64,
}

impl Default for ThresholdCatalog {
    fn default() -> Self {
        Self {
            base: BaseThresholds::default(),
            phases: PhaseMultipliers::default(),
            criticality: CriticalityAdjustments::default(),
            user_facing_bonus: default_user_facing_bonus(),
            failure_escalation: default_failure_escalation(),
            success_rate_floor: default_success_rate_floor(),
        }
    }
}

fn default_user_facing_bonus() -> f64 {
    5.0
}
fn default_failure_escalation() -> f64 {
    5.0
}
fn default_success_rate_floor() -> f64 {
    0.85
}

impl ThresholdCatalog {
    pub fn base_threshold(&self, category: TaskCategory) -> u32 {
        self.base.get(category)
    }

    pub fn phase_multiplier(&self, phase: ProjectPhase) -> f64 {
        self.phases.get(phase)
    }

    pub fn criticality_adjustment(&self, level: CriticalityLevel) -> f64 {
        self.criticality.get(level)
    }

    /// Validate the catalog keeps thresholds bounded and modifiers pointing
    /// the right way.
    ///
    /// Reports the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in TaskCategory::ALL {
            let value = self.base_threshold(category);
            if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&value) {
                return Err(ConfigError::invalid(
                    format!("thresholds.base.{}", category.as_str()),
                    format!(
                        "{} is outside [{}, {}]",
                        value, MIN_THRESHOLD, MAX_THRESHOLD
                    ),
                ));
            }
        }

        for phase in ProjectPhase::ALL {
            let multiplier = self.phase_multiplier(phase);
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(ConfigError::invalid(
                    format!("thresholds.phases.{}", phase.as_str().replace('-', "_")),
                    "must be a positive number".to_string(),
                ));
            }
        }
        if self.phases.pre_release < 1.0 {
            return Err(ConfigError::invalid(
                "thresholds.phases.pre_release".to_string(),
                "must not lower the threshold (>= 1.0)".to_string(),
            ));
        }
        if self.phases.exploration > 1.0 {
            return Err(ConfigError::invalid(
                "thresholds.phases.exploration".to_string(),
                "must not raise the threshold (<= 1.0)".to_string(),
            ));
        }

        for level in CriticalityLevel::ALL {
            if !self.criticality_adjustment(level).is_finite() {
                return Err(ConfigError::invalid(
                    format!("thresholds.criticality.{}", level.as_str()),
                    "must be a finite number".to_string(),
                ));
            }
        }
        if self.criticality.critical < 0.0 {
            return Err(ConfigError::invalid(
                "thresholds.criticality.critical".to_string(),
                "must not lower the threshold".to_string(),
            ));
        }
        if self.criticality.trivial > 0.0 {
            return Err(ConfigError::invalid(
                "thresholds.criticality.trivial".to_string(),
                "must not raise the threshold".to_string(),
            ));
        }

        if !self.user_facing_bonus.is_finite() || self.user_facing_bonus < 0.0 {
            return Err(ConfigError::invalid(
                "thresholds.user_facing_bonus".to_string(),
                "must be zero or positive".to_string(),
            ));
        }
        if !self.failure_escalation.is_finite() || self.failure_escalation <= 0.0 {
            return Err(ConfigError::invalid(
                "thresholds.failure_escalation".to_string(),
                "must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.success_rate_floor) {
            return Err(ConfigError::invalid(
                "thresholds.success_rate_floor".to_string(),
                "must be within [0.0, 1.0]".to_string(),
            ));
        }

        Ok(())
    }
}
