use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::presets::PresetLevel;
use super::thresholds::ThresholdCatalog;
use crate::errors::ConfigError;

/// Root configuration structure for qualitybar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityBarConfig {
    /// Preset applied on top of `thresholds`
    #[serde(default)]
    pub preset: Option<PresetLevel>,

    /// Catalog overrides
    #[serde(default)]
    pub thresholds: ThresholdCatalog,

    /// Decision ledger settings
    #[serde(default)]
    pub history: HistoryConfig,
}

impl QualityBarConfig {
    /// The catalog the engine should run with, preset applied
    pub fn effective_catalog(&self) -> ThresholdCatalog {
        self.preset
            .unwrap_or_default()
            .apply(self.thresholds.clone())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Presets saturate, so check the raw values before they are shifted
        self.thresholds.validate()?;
        self.effective_catalog().validate()?;
        self.history.validate()
    }
}

/// Where and how threshold decisions are recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Record every decision to the ledger
    #[serde(default = "default_history_enabled")]
    pub enabled: bool,

    /// Directory holding the ledger file
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Keep at most this many decisions, dropping the oldest.
    /// Unset means the ledger grows without bound.
    #[serde(default)]
    pub max_entries: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_history_enabled(),
            storage_dir: default_storage_dir(),
            max_entries: None,
        }
    }
}

impl HistoryConfig {
    /// Anchor a relative storage directory at `base`, the directory of the
    /// config file that declared it.
    pub fn anchored_at(mut self, base: &Path) -> Self {
        if self.storage_dir.is_relative() {
            self.storage_dir = base.join(&self.storage_dir);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == Some(0) {
            return Err(ConfigError::invalid(
                "history.max_entries",
                "must be greater than 0 (omit it for unbounded history)",
            ));
        }
        Ok(())
    }
}

fn default_history_enabled() -> bool {
    true
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".qualitybar")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaskCategory;

    #[test]
    fn test_default_config_is_valid() {
        assert!(QualityBarConfig::default().validate().is_ok());
    }

    #[test]
    fn test_effective_catalog_applies_preset() {
        let config = QualityBarConfig {
            preset: Some(PresetLevel::Lenient),
            ..Default::default()
        };
        assert_eq!(
            config
                .effective_catalog()
                .base_threshold(TaskCategory::Testing),
            80
        );
    }

    #[test]
    fn test_zero_max_entries_rejected() {
        let config = QualityBarConfig {
            history: HistoryConfig {
                max_entries: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { ref field, .. }) if field == "history.max_entries"
        ));
    }

    #[test]
    fn test_anchoring_only_touches_relative_dirs() {
        let base = Path::new("/srv/project");

        let relative = HistoryConfig::default().anchored_at(base);
        assert_eq!(relative.storage_dir, PathBuf::from("/srv/project/.qualitybar"));

        let absolute = HistoryConfig {
            storage_dir: PathBuf::from("/var/lib/qualitybar"),
            ..Default::default()
        }
        .anchored_at(base);
        assert_eq!(absolute.storage_dir, PathBuf::from("/var/lib/qualitybar"));
    }
}
