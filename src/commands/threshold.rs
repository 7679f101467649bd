use anyhow::Result;

use crate::config::QualityBarConfig;
use crate::core::ThresholdContext;
use crate::output::{self, OutputFormat};
use crate::thresholds::{AdaptiveQualityThresholds, ThresholdRequest};

#[derive(Debug, Clone, Default)]
pub struct ThresholdOptions {
    pub task_type: String,
    pub phase: Option<String>,
    pub criticality: Option<String>,
    pub user_facing: bool,
    pub recent_failures: Vec<String>,
    pub success_rate: Option<f64>,
    pub explain: bool,
    pub no_record: bool,
    pub format: OutputFormat,
}

impl ThresholdOptions {
    // Pure function to build the engine request
    pub fn to_request(&self) -> ThresholdRequest {
        let mut request = ThresholdRequest::new(self.task_type.clone()).user_facing(self.user_facing);
        if let Some(phase) = &self.phase {
            request = request.phase(phase.clone());
        }
        if let Some(criticality) = &self.criticality {
            request = request.criticality(criticality.clone());
        }
        if !self.recent_failures.is_empty() || self.success_rate.is_some() {
            request = request.context(ThresholdContext {
                recent_failures: self.recent_failures.clone(),
                recent_success_rate: self.success_rate,
                ..Default::default()
            });
        }
        request
    }
}

pub fn run_threshold(mut config: QualityBarConfig, options: &ThresholdOptions) -> Result<()> {
    if options.no_record {
        config.history.enabled = false;
    }

    let engine = AdaptiveQualityThresholds::from_config(&config);
    let request = options.to_request();

    match (options.format, options.explain) {
        (OutputFormat::Json, _) => {
            let explained = engine.get_threshold_with_explanation(&request);
            println!("{}", output::to_json(&explained)?);
        }
        (OutputFormat::Terminal, true) => {
            let explained = engine.get_threshold_with_explanation(&request);
            print!("{}", output::render_explanation(&explained));
        }
        (OutputFormat::Terminal, false) => {
            println!("{}", engine.get_threshold(&request));
        }
    }

    Ok(())
}
