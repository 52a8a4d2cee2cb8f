use super::common::*;
use crate::scoring::{
    Analyte, AnalyteReadings, Metric, Profile, ScanRecord, ScoringConfig, ScoringEngine,
};

#[test]
fn engine_sanitizes_before_scoring() {
    let engine = ScoringEngine::default();
    let readings = AnalyteReadings {
        sodium: Some(f64::INFINITY),
        ..AnalyteReadings::default()
    };

    let result = engine.score(&readings, Profile::Standard);

    assert_eq!(result.total_score, 50.0);
    assert!(result
        .metric(Metric::Sodium)
        .is_some_and(|metric| metric.weight == 0.0));
}

#[test]
fn results_list_metrics_in_stable_order() {
    let result = ScoringEngine::default().score(&spring_water(), Profile::Senior);
    let order: Vec<Metric> = result.metrics.iter().map(|metric| metric.metric).collect();
    assert_eq!(order, Metric::ordered().to_vec());
    assert_eq!(result.profile, Profile::Senior);
}

#[test]
fn derived_readings_travel_with_the_result() {
    let result = ScoringEngine::default().score(&spring_water(), Profile::Standard);

    assert_eq!(result.derived.data_completeness, 100.0);
    assert!(result.derived.pral.is_some_and(|pral| pral < 0.0));
    assert!(result.derived.hardness.is_some());
}

#[test]
fn fluoridated_supply_changes_only_fluoride() {
    let readings = spring_water().with(Analyte::Fluoride, 0.8);
    let natural = ScoringEngine::default().score(&readings, Profile::Standard);
    let fluoridated = ScoringEngine::new(ScoringConfig {
        fluoridated_supply: true,
    })
    .score(&readings, Profile::Standard);

    for (left, right) in natural.metrics.iter().zip(&fluoridated.metrics) {
        if left.metric != Metric::Fluoride {
            assert_eq!(left, right);
        }
    }
    assert!(fluoridated
        .metric(Metric::Fluoride)
        .is_some_and(|metric| metric.explanation.contains("0.6-1.2")));
}

#[test]
fn batch_scoring_preserves_order_and_profiles() {
    let engine = ScoringEngine::default();
    let scans = vec![
        ScanRecord {
            label: "spring".to_string(),
            profile: None,
            readings: spring_water(),
        },
        ScanRecord {
            label: "well".to_string(),
            profile: Some(Profile::Infant),
            readings: infant_water_with_nitrate(60.0),
        },
        ScanRecord {
            label: "blank".to_string(),
            profile: None,
            readings: AnalyteReadings::default(),
        },
    ];

    let scored = engine.score_batch(&scans, Profile::Sport);

    let labels: Vec<&str> = scored.iter().map(|scan| scan.label.as_str()).collect();
    assert_eq!(labels, ["spring", "well", "blank"]);
    assert_eq!(scored[0].result.profile, Profile::Sport);
    assert_eq!(scored[1].result.profile, Profile::Infant);
    assert!(scored[1].result.total_score <= 70.0);
    assert_eq!(scored[2].result.total_score, 50.0);
    assert_eq!(
        scored[0].result,
        engine.score(&spring_water(), Profile::Sport)
    );
}
