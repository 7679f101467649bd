//! CLI command implementations for qualitybar operations.
//!
//! Available commands:
//! - **threshold**: Compute (and record) the quality bar for a task
//! - **stats**: Summarize the decision ledger
//! - **history**: List recorded decisions
//! - **init**: Initialize a new qualitybar configuration file

pub mod history;
pub mod init;
pub mod stats;
pub mod threshold;

pub use history::{show_history, HistoryOptions};
pub use init::init_config;
pub use stats::show_statistics;
pub use threshold::{run_threshold, ThresholdOptions};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{load_config, load_config_from_path, QualityBarConfig};

/// Load configuration for a command run.
///
/// An explicit `--config` must load cleanly; otherwise discovery falls back
/// to defaults. A storage directory from the CLI or environment wins over
/// the file.
pub fn resolve_config(
    config_path: Option<&Path>,
    storage_dir: Option<PathBuf>,
) -> Result<QualityBarConfig> {
    let mut config = match config_path {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => load_config(),
    };

    if let Some(dir) = storage_dir {
        config.history.storage_dir = dir;
    }

    Ok(config)
}
