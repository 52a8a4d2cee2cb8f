use super::common::*;
use crate::scoring::scorers::{self, Tier};
use crate::scoring::{DerivedReadings, Metric, MetricResult, Profile};

#[test]
fn absent_input_contributes_nothing() {
    let result = scorers::sodium(None, &policy(Profile::Standard));

    assert_eq!(result.score, 0.0);
    assert_eq!(result.weight, 0.0);
    assert_eq!(result.explanation, "Sodium unknown");
    assert!(!result.is_active());
}

#[test]
fn measured_zero_is_not_unknown() {
    let result = scorers::sodium(Some(0.0), &policy(Profile::Standard));

    assert_eq!(result.score, 100.0);
    assert_eq!(result.weight, 1.0);
    assert_eq!(result.value, Some(0.0));
}

#[test]
fn non_finite_input_is_treated_as_absent() {
    let result = scorers::ph(Some(f64::NAN), &policy(Profile::Standard));
    assert_eq!(result, MetricResult::unknown(Metric::Ph));
}

#[test]
fn sodium_is_stricter_for_sensitive_profiles() {
    let infant = scorers::sodium(Some(100.0), &policy(Profile::Infant));
    let standard = scorers::sodium(Some(100.0), &policy(Profile::Standard));

    assert_eq!(infant.score, 30.0);
    assert_eq!(infant.weight, 2.0);
    assert_eq!(standard.score, 50.0);
    assert_eq!(standard.weight, 1.0);
    assert!(infant.score < standard.score);
}

#[test]
fn sodium_ladders_follow_published_cutoffs() {
    let strict = policy(Profile::BloodPressure);
    let cases = [(5.0, 100.0), (15.0, 80.0), (40.0, 50.0), (150.0, 30.0), (900.0, 30.0)];
    for (value, expected) in cases {
        assert_eq!(scorers::sodium(Some(value), &strict).score, expected, "{value}");
    }

    let general = policy(Profile::Sport);
    let cases = [(20.0, 100.0), (35.0, 80.0), (200.0, 50.0), (900.0, 50.0)];
    for (value, expected) in cases {
        assert_eq!(scorers::sodium(Some(value), &general).score, expected, "{value}");
    }
}

#[test]
fn nitrate_over_legal_limit_fails_for_infants() {
    let infant = scorers::nitrate(Some(60.0), &policy(Profile::Infant));
    assert!(infant.score < 30.0);
    assert_eq!(infant.weight, 2.0);
    assert_eq!(infant.tier(), Tier::Concerning);

    let pregnancy = scorers::nitrate(Some(15.0), &policy(Profile::Pregnancy));
    assert_eq!(pregnancy.score, 60.0);

    let standard = scorers::nitrate(Some(15.0), &policy(Profile::Standard));
    assert_eq!(standard.score, 100.0);
    assert_eq!(standard.weight, 1.0);
}

#[test]
fn infant_fluoride_ladder_caps_at_twenty() {
    let infant = policy(Profile::Infant);
    assert_eq!(scorers::fluoride(Some(0.2), &infant).score, 100.0);
    assert_eq!(scorers::fluoride(Some(0.5), &infant).score, 70.0);
    assert_eq!(scorers::fluoride(Some(0.9), &infant).score, 40.0);
    assert_eq!(scorers::fluoride(Some(1.4), &infant).score, 20.0);
    assert_eq!(scorers::fluoride(Some(9.0), &infant).score, 20.0);
}

#[test]
fn adult_fluoride_tolerates_natural_levels() {
    let standard = policy(Profile::Standard);
    assert_eq!(scorers::fluoride(Some(1.2), &standard).score, 100.0);
    assert_eq!(scorers::fluoride(Some(3.0), &standard).score, 25.0);

    let fluoridated = standard.with_fluoridated_supply(true);
    assert_eq!(scorers::fluoride(Some(0.9), &fluoridated).score, 100.0);
    assert!(scorers::fluoride(Some(0.1), &fluoridated).score < 50.0);
}

#[test]
fn ph_is_scored_on_a_bell_around_the_profile_ideal() {
    let standard = policy(Profile::Standard);
    assert_eq!(scorers::ph(Some(7.5), &standard).score, 100.0);
    assert_eq!(scorers::ph(Some(5.0), &standard).score, 0.0);

    let coffee = scorers::ph(Some(7.5), &policy(Profile::Coffee));
    assert!(coffee.score < 100.0);
    assert_eq!(coffee.weight, 1.5);
}

#[test]
fn calcium_band_depends_on_profile() {
    let sport = scorers::calcium(Some(80.0), &policy(Profile::Sport));
    let standard = scorers::calcium(Some(80.0), &policy(Profile::Standard));

    assert_eq!(standard.score, 100.0);
    assert_close(sport.score, 48.0);
    assert!(sport.explanation.contains("below"));
}

#[test]
fn extreme_values_stay_in_range() {
    let standard = policy(Profile::Standard);
    let extremes = [
        scorers::ph(Some(14.0), &standard),
        scorers::ph(Some(-3.0), &standard),
        scorers::calcium(Some(10_000.0), &standard),
        scorers::calcium(Some(-5.0), &standard),
        scorers::tds(Some(1e12), &standard),
        scorers::calcium_magnesium_ratio(Some(1e9), &standard),
    ];

    for result in extremes {
        assert!((0.0..=100.0).contains(&result.score), "{result:?}");
    }
}

#[test]
fn explanations_are_tiered_by_score() {
    let standard = policy(Profile::Standard);

    let good = scorers::chloride(Some(10.0), &standard);
    let acceptable = scorers::chloride(Some(200.0), &standard);
    let concerning = scorers::chloride(Some(400.0), &standard);

    assert_eq!(good.tier(), Tier::Good);
    assert_eq!(acceptable.tier(), Tier::Acceptable);
    assert_eq!(concerning.tier(), Tier::Concerning);
    assert!(good.explanation.contains("low"));
    assert!(acceptable.explanation.contains("slightly salty"));
    assert!(concerning.explanation.contains("elevated"));
}

#[test]
fn every_scorer_explains_itself() {
    let readings = spring_water();
    let derived = DerivedReadings::from_readings(&readings);
    for profile in Profile::ordered() {
        for result in scorers::score_all(&readings, &derived, &policy(profile)) {
            assert!(!result.explanation.is_empty());
            if result.value.is_some() {
                assert!(!result.explanation.ends_with("unknown"), "{result:?}");
            }
        }
    }
}

#[test]
fn transparency_is_inactive_without_core_analytes() {
    let readings = only(crate::scoring::Analyte::Silica, 10.0);
    let derived = DerivedReadings::from_readings(&readings);
    let result = scorers::score_metric(
        Metric::DataTransparency,
        &readings,
        &derived,
        &policy(Profile::Standard),
    );

    assert_eq!(result.weight, 0.0);
    assert_eq!(result.score, 0.0);
}

#[test]
fn derived_scorers_read_derived_values() {
    let readings = spring_water();
    let derived = DerivedReadings::from_readings(&readings);
    let results = scorers::score_all(&readings, &derived, &policy(Profile::Standard));

    let hardness = results
        .iter()
        .find(|result| result.metric == Metric::Hardness)
        .expect("hardness scored");
    assert_eq!(hardness.value, derived.hardness);
    assert_eq!(hardness.score, 100.0);

    let buffer = results
        .iter()
        .find(|result| result.metric == Metric::BufferCapacity)
        .expect("buffer scored");
    assert_eq!(buffer.score, 80.0);
}
