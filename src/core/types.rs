//! Canonical tags the threshold catalog is keyed by

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest threshold the engine will ever return
pub const MIN_THRESHOLD: u32 = 60;

/// Highest threshold the engine will ever return
pub const MAX_THRESHOLD: u32 = 100;

/// Category of work being judged
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCategory {
    Security,
    Bugfix,
    /// Fallback for unrecognized task types
    #[default]
    Feature,
    Refactoring,
    Performance,
    Testing,
    Infrastructure,
    Documentation,
    Exploratory,
    Prototype,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 10] = [
        TaskCategory::Security,
        TaskCategory::Bugfix,
        TaskCategory::Feature,
        TaskCategory::Refactoring,
        TaskCategory::Performance,
        TaskCategory::Testing,
        TaskCategory::Infrastructure,
        TaskCategory::Documentation,
        TaskCategory::Exploratory,
        TaskCategory::Prototype,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskCategory::Security => "security",
            TaskCategory::Bugfix => "bugfix",
            TaskCategory::Feature => "feature",
            TaskCategory::Refactoring => "refactoring",
            TaskCategory::Performance => "performance",
            TaskCategory::Testing => "testing",
            TaskCategory::Infrastructure => "infrastructure",
            TaskCategory::Documentation => "documentation",
            TaskCategory::Exploratory => "exploratory",
            TaskCategory::Prototype => "prototype",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle stage of the project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectPhase {
    /// Neutral phase, used when nothing more specific applies
    #[default]
    Development,
    PreRelease,
    Maintenance,
    Exploration,
}

impl ProjectPhase {
    pub const ALL: [ProjectPhase; 4] = [
        ProjectPhase::Development,
        ProjectPhase::PreRelease,
        ProjectPhase::Maintenance,
        ProjectPhase::Exploration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectPhase::Development => "development",
            ProjectPhase::PreRelease => "pre-release",
            ProjectPhase::Maintenance => "maintenance",
            ProjectPhase::Exploration => "exploration",
        }
    }
}

impl fmt::Display for ProjectPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity classification of the change being evaluated
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CriticalityLevel {
    Trivial,
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl CriticalityLevel {
    pub const ALL: [CriticalityLevel; 5] = [
        CriticalityLevel::Trivial,
        CriticalityLevel::Low,
        CriticalityLevel::Medium,
        CriticalityLevel::High,
        CriticalityLevel::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CriticalityLevel::Trivial => "trivial",
            CriticalityLevel::Low => "low",
            CriticalityLevel::Medium => "medium",
            CriticalityLevel::High => "high",
            CriticalityLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for CriticalityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_serialize_as_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ProjectPhase::PreRelease).unwrap(),
            "\"pre-release\""
        );
        assert_eq!(
            serde_json::to_string(&TaskCategory::Security).unwrap(),
            "\"security\""
        );
    }

    #[test]
    fn test_display_matches_serialized_name() {
        for category in TaskCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
        for phase in ProjectPhase::ALL {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{}\"", phase));
        }
    }

    #[test]
    fn test_criticality_ordering() {
        assert!(CriticalityLevel::Critical > CriticalityLevel::High);
        assert!(CriticalityLevel::Trivial < CriticalityLevel::Low);
    }
}
