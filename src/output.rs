//! Rendering of engine results for the command line.

use clap::ValueEnum;
use colored::*;
use serde::Serialize;

use crate::core::ThresholdDecision;
use crate::ledger::{LedgerStatistics, StatisticsReport};
use crate::thresholds::{QualityTier, ThresholdExplanation};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn tier_colored(tier: QualityTier, text: &str) -> ColoredString {
    match tier {
        QualityTier::VeryHigh => text.red().bold(),
        QualityTier::High => text.yellow().bold(),
        QualityTier::Standard => text.green(),
        QualityTier::Relaxed => text.cyan(),
    }
}

pub fn render_explanation(explained: &ThresholdExplanation) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        "Threshold:".bold(),
        tier_colored(explained.tier, &explained.threshold.to_string())
    ));
    out.push_str(&format!(
        "{} {} ({})\n",
        "Task type:".bold(),
        explained.task_type,
        explained.category
    ));
    for step in &explained.explanation {
        out.push_str(&format!("  - {}\n", step));
    }
    out.push_str(&format!("{}\n", explained.rationale.italic()));
    out
}

pub fn render_statistics(report: &StatisticsReport) -> String {
    match report {
        StatisticsReport::Available(stats) => render_available_statistics(stats),
        StatisticsReport::Unavailable { error } => {
            format!("{} {}\n", "Statistics unavailable:".red().bold(), error)
        }
    }
}

fn render_available_statistics(stats: &LedgerStatistics) -> String {
    if stats.total_decisions == 0 {
        return "No threshold decisions recorded yet.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", "Threshold decisions".bold()));
    out.push_str(&format!("  Total:       {}\n", stats.total_decisions));
    out.push_str(&format!("  Average:     {:.2}\n", stats.average_threshold));
    out.push_str(&format!(
        "  Range:       {} - {}\n",
        display_opt(stats.min_threshold),
        display_opt(stats.max_threshold)
    ));
    out.push_str(&format!(
        "  Most common: {}\n",
        stats.most_common_task_type.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("  Recorded:    {}\n", stats.adjustments_applied));
    for (task_type, count) in &stats.decisions_by_task_type {
        out.push_str(&format!("    {:<16} {}\n", task_type, count));
    }
    out
}

fn display_opt(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn render_history(decisions: &[ThresholdDecision]) -> String {
    if decisions.is_empty() {
        return "No threshold decisions recorded yet.\n".to_string();
    }

    decisions
        .iter()
        .map(|d| {
            let tier = QualityTier::from_threshold(d.threshold);
            format!(
                "{}  {:>3}  {:<16} phase={} criticality={}{}\n",
                d.timestamp.format("%Y-%m-%d %H:%M:%S"),
                tier_colored(tier, &d.threshold.to_string()),
                d.task_type,
                d.project_phase.as_deref().unwrap_or("-"),
                d.criticality.as_deref().unwrap_or("-"),
                if d.is_user_facing { " user-facing" } else { "" }
            )
        })
        .collect()
}
