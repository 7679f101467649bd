use anyhow::Result;
use clap::Parser;
use qualitybar::cli::{Cli, Commands};
use qualitybar::commands::{self, HistoryOptions, ThresholdOptions};
use qualitybar::observability::init_tracing;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Init { force } => commands::init_config(force),
        Commands::Threshold {
            task_type,
            phase,
            criticality,
            user_facing,
            recent_failures,
            success_rate,
            explain,
            no_record,
            format,
        } => {
            let config = commands::resolve_config(cli.config.as_deref(), cli.storage_dir)?;
            let options = ThresholdOptions {
                task_type,
                phase,
                criticality,
                user_facing,
                recent_failures,
                success_rate,
                explain,
                no_record,
                format,
            };
            commands::run_threshold(config, &options)
        }
        Commands::Stats { format } => {
            let config = commands::resolve_config(cli.config.as_deref(), cli.storage_dir)?;
            commands::show_statistics(&config, format)
        }
        Commands::History { limit, format } => {
            let config = commands::resolve_config(cli.config.as_deref(), cli.storage_dir)?;
            commands::show_history(&config, HistoryOptions { limit, format })
        }
    }
}
