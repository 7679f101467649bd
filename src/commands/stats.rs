use anyhow::Result;

use crate::config::QualityBarConfig;
use crate::ledger::{DecisionLedger, LedgerStatistics, StatisticsReport};
use crate::output::{self, OutputFormat};

/// Print ledger statistics. A ledger that cannot be read is reported and
/// turned into a failing exit.
pub fn show_statistics(config: &QualityBarConfig, format: OutputFormat) -> Result<()> {
    let report = if config.history.enabled {
        DecisionLedger::at(&config.history.storage_dir).get_statistics()
    } else {
        StatisticsReport::Available(LedgerStatistics::empty())
    };

    match format {
        OutputFormat::Json => println!("{}", output::to_json(&report)?),
        OutputFormat::Terminal => print!("{}", output::render_statistics(&report)),
    }

    match report.error() {
        Some(error) => anyhow::bail!("Ledger statistics unavailable: {}", error),
        None => Ok(()),
    }
}
