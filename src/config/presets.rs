//! Catalog presets for common quality postures.
//!
//! - **Strict**: every base threshold raised by five points
//! - **Balanced**: the default catalog
//! - **Lenient**: every base threshold lowered by five points
//!
//! Shifts saturate into the valid threshold range, so a strict security bar
//! stays at 100 rather than overflowing.
//!
//! # Example
//!
//! ```rust
//! use qualitybar::config::PresetLevel;
//! use qualitybar::core::TaskCategory;
//!
//! let catalog = PresetLevel::Strict.catalog();
//! assert_eq!(catalog.base_threshold(TaskCategory::Feature), 85);
//! ```

use serde::{Deserialize, Serialize};

use super::thresholds::ThresholdCatalog;

/// Preset catalog levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetLevel {
    /// Raised bars for high-assurance projects
    Strict,
    /// Default catalog (recommended)
    #[default]
    Balanced,
    /// Lowered bars for legacy or early-stage projects
    Lenient,
}

impl PresetLevel {
    /// Points added to every base threshold
    pub fn base_shift(self) -> i32 {
        match self {
            PresetLevel::Strict => 5,
            PresetLevel::Balanced => 0,
            PresetLevel::Lenient => -5,
        }
    }

    /// The default catalog with this preset applied.
    pub fn catalog(self) -> ThresholdCatalog {
        self.apply(ThresholdCatalog::default())
    }

    /// Apply this preset on top of an existing catalog.
    pub fn apply(self, catalog: ThresholdCatalog) -> ThresholdCatalog {
        ThresholdCatalog {
            base: catalog.base.shifted(self.base_shift()),
            ..catalog
        }
    }

    /// Parse preset from string name (returns Option instead of Result).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Some(PresetLevel::Strict),
            "balanced" | "default" => Some(PresetLevel::Balanced),
            "lenient" | "permissive" => Some(PresetLevel::Lenient),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PresetLevel::Strict => "strict",
            PresetLevel::Balanced => "balanced",
            PresetLevel::Lenient => "lenient",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaskCategory;

    #[test]
    fn test_balanced_is_default_catalog() {
        assert_eq!(PresetLevel::Balanced.catalog(), ThresholdCatalog::default());
    }

    #[test]
    fn test_strict_raises_and_saturates() {
        let catalog = PresetLevel::Strict.catalog();
        assert_eq!(catalog.base_threshold(TaskCategory::Feature), 85);
        assert_eq!(catalog.base_threshold(TaskCategory::Security), 100);
    }

    #[test]
    fn test_lenient_lowers_and_saturates() {
        let catalog = PresetLevel::Lenient.catalog();
        assert_eq!(catalog.base_threshold(TaskCategory::Feature), 75);
        assert_eq!(catalog.base_threshold(TaskCategory::Prototype), 60);
    }

    #[test]
    fn test_presets_keep_catalog_valid() {
        for preset in [PresetLevel::Strict, PresetLevel::Balanced, PresetLevel::Lenient] {
            assert!(preset.catalog().validate().is_ok(), "{}", preset.as_str());
        }
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!(PresetLevel::parse("STRICT"), Some(PresetLevel::Strict));
        assert_eq!(PresetLevel::parse("permissive"), Some(PresetLevel::Lenient));
        assert_eq!(PresetLevel::parse("loose"), None);
    }
}
