use anyhow::{Context, Result};

use crate::config::QualityBarConfig;
use crate::ledger::DecisionLedger;
use crate::output::{self, OutputFormat};

#[derive(Debug, Clone, Copy)]
pub struct HistoryOptions {
    pub limit: usize,
    pub format: OutputFormat,
}

pub fn show_history(config: &QualityBarConfig, options: HistoryOptions) -> Result<()> {
    let ledger = DecisionLedger::at(&config.history.storage_dir);

    let decisions = ledger
        .recent(options.limit)
        .with_context(|| format!("Failed to read {}", ledger.path().display()))?;

    match options.format {
        OutputFormat::Json => println!("{}", output::to_json(&decisions)?),
        OutputFormat::Terminal => print!("{}", output::render_history(&decisions)),
    }

    Ok(())
}
