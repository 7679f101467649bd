use pretty_assertions::assert_eq;
use qualitybar::{
    AdaptiveQualityThresholds, TaskCategory, ThresholdCatalog, ThresholdContext, ThresholdRequest,
};

fn engine() -> AdaptiveQualityThresholds {
    AdaptiveQualityThresholds::without_history(ThresholdCatalog::default())
}

#[test]
fn test_end_to_end_security_release_hits_ceiling() {
    let request = ThresholdRequest::new("security")
        .phase("pre-release")
        .criticality("critical")
        .user_facing(true)
        .context(ThresholdContext::new().with_failure("integration-suite"));

    assert_eq!(engine().get_threshold(&request), 100);
}

#[test]
fn test_unknown_category_stays_near_feature_base() {
    let engine = engine();
    let feature_base = engine.catalog().base_threshold(TaskCategory::Feature) as i64;

    let threshold = engine.get_threshold(&ThresholdRequest::new("not_a_real_category")) as i64;

    assert!((threshold - feature_base).abs() <= 10);
}

#[test]
fn test_task_type_only_is_clamped() {
    let engine = engine();
    for name in ["security", "documentation", "prototype", "", "???"] {
        let threshold = engine.get_threshold(&ThresholdRequest::new(name));
        assert!((60..=100).contains(&threshold), "{} -> {}", name, threshold);
    }
}

#[test]
fn test_recent_failures_strictly_raise_the_bar() {
    let engine = engine();
    for task in ["feature", "documentation", "testing"] {
        let calm = engine.get_threshold(&ThresholdRequest::new(task).context(ThresholdContext::new()));
        let failing = engine.get_threshold(
            &ThresholdRequest::new(task).context(ThresholdContext::new().with_failure("x")),
        );
        assert!(failing > calm, "{}: {} !> {}", task, failing, calm);
    }
}

#[test]
fn test_low_success_rate_raises_the_bar() {
    let engine = engine();
    let healthy = engine.get_threshold(
        &ThresholdRequest::new("feature").context(ThresholdContext::new().with_success_rate(0.95)),
    );
    let degraded = engine.get_threshold(
        &ThresholdRequest::new("feature").context(ThresholdContext::new().with_success_rate(0.6)),
    );

    assert_eq!(healthy, 80);
    assert_eq!(degraded, 85);
}

#[test]
fn test_phase_direction_for_every_category() {
    let engine = engine();
    for category in TaskCategory::ALL {
        let name = category.as_str();
        let release = engine.get_threshold(&ThresholdRequest::new(name).phase("pre-release"));
        let neutral = engine.get_threshold(&ThresholdRequest::new(name));
        let exploring = engine.get_threshold(&ThresholdRequest::new(name).phase("exploration"));

        assert!(release >= neutral, "{}", name);
        assert!(neutral >= exploring, "{}", name);
    }
}

#[test]
fn test_explanation_reports_base_and_rationale() {
    let explained = engine().get_threshold_with_explanation(
        &ThresholdRequest::new("docs")
            .phase("exploration")
            .criticality("trivial"),
    );

    // 70 * 0.85 - 10 = 49.5, clamped up
    assert_eq!(explained.threshold, 60);
    assert_eq!(explained.base_threshold, 70);
    assert_eq!(explained.task_type, "docs");
    assert_eq!(
        explained.explanation,
        vec![
            "Base threshold for documentation: 70".to_string(),
            "Project phase 'exploration': x0.85".to_string(),
            "Criticality 'trivial': -10".to_string(),
            "Clamped 49.5 to 60".to_string(),
        ]
    );
    assert_eq!(
        explained.rationale,
        "Relaxed standards acceptable for documentation work"
    );
}

#[test]
fn test_explanation_serializes_expected_keys() {
    let explained = engine().get_threshold_with_explanation(&ThresholdRequest::new("feature"));
    let json = serde_json::to_value(&explained).unwrap();

    for key in ["threshold", "base_threshold", "task_type", "explanation", "rationale"] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
}
