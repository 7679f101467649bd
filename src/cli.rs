use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "qualitybar")]
#[command(about = "Context-sensitive quality acceptance thresholds", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (skips .qualitybar.toml discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the decision ledger
    #[arg(long, global = true, env = "QUALITYBAR_STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the quality threshold for a task
    Threshold {
        /// Task type (security, feature, testing, documentation, ...)
        task_type: String,

        /// Project phase (pre-release, exploration, maintenance, development)
        #[arg(long)]
        phase: Option<String>,

        /// Criticality (critical, high, medium, low, trivial)
        #[arg(long)]
        criticality: Option<String>,

        /// The change is visible to end users
        #[arg(long)]
        user_facing: bool,

        /// Identifier of a recent failure (repeatable)
        #[arg(long = "recent-failure")]
        recent_failures: Vec<String>,

        /// Recent success rate between 0.0 and 1.0
        #[arg(long, value_parser = parse_success_rate)]
        success_rate: Option<f64>,

        /// Show the factors behind the threshold
        #[arg(long)]
        explain: bool,

        /// Do not record this decision in the ledger
        #[arg(long)]
        no_record: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Show statistics derived from the decision ledger
    Stats {
        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// List recorded decisions, oldest first
    History {
        /// Show only the last N decisions
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Write a default .qualitybar.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Accept only rates in `[0.0, 1.0]`; NaN is rejected
fn parse_success_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("{} is outside [0.0, 1.0]", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_threshold_with_repeated_failures() {
        let cli = Cli::try_parse_from([
            "qualitybar",
            "threshold",
            "security",
            "--phase",
            "pre-release",
            "--recent-failure",
            "a",
            "--recent-failure",
            "b",
            "--user-facing",
        ])
        .unwrap();

        match cli.command {
            Commands::Threshold {
                task_type,
                phase,
                recent_failures,
                user_facing,
                ..
            } => {
                assert_eq!(task_type, "security");
                assert_eq!(phase.as_deref(), Some("pre-release"));
                assert_eq!(recent_failures, vec!["a", "b"]);
                assert!(user_facing);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["qualitybar", "stats", "--storage-dir", "/tmp/x", "-vv"])
            .unwrap();
        assert_eq!(cli.storage_dir, Some(PathBuf::from("/tmp/x")));
        assert_eq!(cli.verbosity, 2);
    }

    #[test]
    fn test_success_rate_bounds() {
        assert_eq!(parse_success_rate("0.85"), Ok(0.85));
        assert_eq!(parse_success_rate("0"), Ok(0.0));
        assert_eq!(parse_success_rate("1"), Ok(1.0));
        assert!(parse_success_rate("1.5").is_err());
        assert!(parse_success_rate("NaN").is_err());
        assert!(parse_success_rate("often").is_err());

        let rejected = Cli::try_parse_from([
            "qualitybar",
            "threshold",
            "feature",
            "--success-rate",
            "1.01",
        ]);
        assert!(rejected.is_err());
    }
}
