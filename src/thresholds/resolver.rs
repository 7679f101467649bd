//! Normalizes caller-supplied identifiers into catalog tags.
//!
//! Resolution is total: anything unrecognized falls back to a defined tag
//! (`feature`, `development`, `medium`) and is only logged at debug level.

use serde::{Deserialize, Serialize};

use crate::core::{CriticalityLevel, ProjectPhase, TaskCategory, ThresholdContext};

/// A threshold query, as a caller phrases it.
///
/// ```rust
/// use qualitybar::thresholds::ThresholdRequest;
///
/// let request = ThresholdRequest::new("security")
///     .phase("pre-release")
///     .criticality("critical")
///     .user_facing(true);
/// assert_eq!(request.task_type, "security");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRequest {
    pub task_type: String,
    #[serde(default)]
    pub project_phase: Option<String>,
    #[serde(default)]
    pub criticality: Option<String>,
    #[serde(default)]
    pub is_user_facing: bool,
    #[serde(default)]
    pub context: Option<ThresholdContext>,
}

impl ThresholdRequest {
    pub fn new(task_type: impl Into<String>) -> Self {
        Self {
            task_type: task_type.into(),
            ..Default::default()
        }
    }

    pub fn phase(mut self, phase: impl Into<String>) -> Self {
        self.project_phase = Some(phase.into());
        self
    }

    pub fn criticality(mut self, criticality: impl Into<String>) -> Self {
        self.criticality = Some(criticality.into());
        self
    }

    pub fn user_facing(mut self, is_user_facing: bool) -> Self {
        self.is_user_facing = is_user_facing;
        self
    }

    pub fn context(mut self, context: ThresholdContext) -> Self {
        self.context = Some(context);
        self
    }
}

/// A request after normalization, ready for the calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedContext {
    pub category: TaskCategory,
    /// `None` when the caller gave no phase
    pub phase: Option<ProjectPhase>,
    /// `None` when the caller gave no criticality
    pub criticality: Option<CriticalityLevel>,
    pub is_user_facing: bool,
    pub has_recent_failures: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ContextResolver {
    success_rate_floor: f64,
}

impl ContextResolver {
    pub fn new(success_rate_floor: f64) -> Self {
        Self { success_rate_floor }
    }

    pub fn resolve(&self, request: &ThresholdRequest) -> ResolvedContext {
        ResolvedContext {
            category: resolve_task_category(&request.task_type),
            phase: supplied(request.project_phase.as_deref()).map(resolve_phase),
            criticality: supplied(request.criticality.as_deref()).map(resolve_criticality),
            is_user_facing: request.is_user_facing,
            has_recent_failures: request
                .context
                .as_ref()
                .is_some_and(|ctx| ctx.has_recent_failures(self.success_rate_floor)),
        }
    }
}

/// Blank strings count as "not supplied"
fn supplied(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.trim().is_empty())
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c.is_whitespace() { '-' } else { c })
        .collect()
}

pub fn match_task_category(raw: &str) -> Option<TaskCategory> {
    let category = match normalize(raw).as_str() {
        "security" | "sec" | "auth" | "vulnerability" => TaskCategory::Security,
        "bugfix" | "bug" | "fix" | "bug-fix" | "hotfix" => TaskCategory::Bugfix,
        "feature" | "feat" => TaskCategory::Feature,
        "refactoring" | "refactor" | "cleanup" => TaskCategory::Refactoring,
        "performance" | "perf" | "optimization" => TaskCategory::Performance,
        "testing" | "test" | "tests" => TaskCategory::Testing,
        "infrastructure" | "infra" | "ci" | "devops" | "build" => TaskCategory::Infrastructure,
        "documentation" | "doc" | "docs" => TaskCategory::Documentation,
        "exploratory" | "explore" | "exploration" | "spike" | "research" => {
            TaskCategory::Exploratory
        }
        "prototype" | "poc" | "prototyping" => TaskCategory::Prototype,
        _ => return None,
    };
    Some(category)
}

pub fn match_phase(raw: &str) -> Option<ProjectPhase> {
    let phase = match normalize(raw).as_str() {
        "pre-release" | "prerelease" | "release" | "release-candidate" | "rc" => {
            ProjectPhase::PreRelease
        }
        "exploration" | "explore" | "exploratory" | "discovery" => ProjectPhase::Exploration,
        "maintenance" | "maint" | "stable" | "production" => ProjectPhase::Maintenance,
        "development" | "dev" | "active" | "default" => ProjectPhase::Development,
        _ => return None,
    };
    Some(phase)
}

pub fn match_criticality(raw: &str) -> Option<CriticalityLevel> {
    let level = match normalize(raw).as_str() {
        "critical" | "crit" | "blocker" => CriticalityLevel::Critical,
        "high" => CriticalityLevel::High,
        "medium" | "med" | "normal" | "moderate" => CriticalityLevel::Medium,
        "low" | "minor" => CriticalityLevel::Low,
        "trivial" | "cosmetic" => CriticalityLevel::Trivial,
        _ => return None,
    };
    Some(level)
}

pub fn resolve_task_category(raw: &str) -> TaskCategory {
    match_task_category(raw).unwrap_or_else(|| {
        tracing::debug!("Unrecognized task type {:?}; treating as feature", raw);
        TaskCategory::default()
    })
}

pub fn resolve_phase(raw: &str) -> ProjectPhase {
    match_phase(raw).unwrap_or_else(|| {
        tracing::debug!("Unrecognized project phase {:?}; using neutral phase", raw);
        ProjectPhase::default()
    })
}

pub fn resolve_criticality(raw: &str) -> CriticalityLevel {
    match_criticality(raw).unwrap_or_else(|| {
        tracing::debug!("Unrecognized criticality {:?}; using medium", raw);
        CriticalityLevel::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_resolve_to_themselves() {
        for category in TaskCategory::ALL {
            assert_eq!(match_task_category(category.as_str()), Some(category));
        }
        for phase in ProjectPhase::ALL {
            assert_eq!(match_phase(phase.as_str()), Some(phase));
        }
        for level in CriticalityLevel::ALL {
            assert_eq!(match_criticality(level.as_str()), Some(level));
        }
    }

    #[test]
    fn test_normalization_folds_case_and_separators() {
        assert_eq!(match_task_category("  Bug_Fix "), Some(TaskCategory::Bugfix));
        assert_eq!(match_phase("PRE_RELEASE"), Some(ProjectPhase::PreRelease));
        assert_eq!(match_phase("release candidate"), Some(ProjectPhase::PreRelease));
    }

    #[test]
    fn test_unknown_inputs_fall_back() {
        assert_eq!(resolve_task_category("not_a_real_category"), TaskCategory::Feature);
        assert_eq!(resolve_phase("someday"), ProjectPhase::Development);
        assert_eq!(resolve_criticality("meh"), CriticalityLevel::Medium);
    }

    #[test]
    fn test_blank_optionals_are_not_supplied() {
        let resolver = ContextResolver::new(0.85);
        let resolved = resolver.resolve(&ThresholdRequest::new("docs").phase("  ").criticality(""));

        assert_eq!(resolved.category, TaskCategory::Documentation);
        assert_eq!(resolved.phase, None);
        assert_eq!(resolved.criticality, None);
    }

    #[test]
    fn test_resolver_reads_failure_signals() {
        let resolver = ContextResolver::new(0.85);

        let calm = resolver.resolve(
            &ThresholdRequest::new("feature").context(ThresholdContext::new().with_success_rate(0.95)),
        );
        assert!(!calm.has_recent_failures);

        let shaky = resolver.resolve(
            &ThresholdRequest::new("feature").context(ThresholdContext::new().with_success_rate(0.5)),
        );
        assert!(shaky.has_recent_failures);

        let none = resolver.resolve(&ThresholdRequest::new("feature"));
        assert!(!none.has_recent_failures);
    }
}
