// Sub-modules
mod core;
mod loader;
pub mod presets;
mod thresholds;

// Re-export core types
pub use self::core::{HistoryConfig, QualityBarConfig};

// Re-export catalog types
pub use thresholds::{BaseThresholds, CriticalityAdjustments, PhaseMultipliers, ThresholdCatalog};

// Re-export loader functions
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, user_config_path, CONFIG_FILE_NAME,
};

pub use presets::PresetLevel;
