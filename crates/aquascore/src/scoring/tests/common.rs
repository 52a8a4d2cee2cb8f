use crate::scoring::{Analyte, AnalyteReadings, ProfilePolicy, Profile};

/// Fully analysed, moderately mineralized still water.
pub(super) fn spring_water() -> AnalyteReadings {
    AnalyteReadings {
        ph: Some(7.4),
        calcium: Some(60.0),
        magnesium: Some(22.0),
        sodium: Some(10.0),
        potassium: Some(2.0),
        chloride: Some(15.0),
        sulfate: Some(30.0),
        bicarbonate: Some(300.0),
        nitrate: Some(3.0),
        fluoride: Some(0.2),
        silica: Some(12.0),
        carbonation: None,
        tds: Some(380.0),
    }
}

/// Soft, low-sodium water that suits infant formula apart from `nitrate`.
pub(super) fn infant_water_with_nitrate(nitrate: f64) -> AnalyteReadings {
    AnalyteReadings {
        ph: Some(7.2),
        calcium: Some(30.0),
        magnesium: Some(10.0),
        sodium: Some(5.0),
        potassium: Some(2.0),
        chloride: Some(10.0),
        sulfate: Some(20.0),
        bicarbonate: Some(150.0),
        nitrate: Some(nitrate),
        fluoride: None,
        silica: None,
        carbonation: None,
        tds: Some(150.0),
    }
}

pub(super) fn only(analyte: Analyte, value: f64) -> AnalyteReadings {
    AnalyteReadings::default().with(analyte, value)
}

pub(super) fn policy(profile: Profile) -> ProfilePolicy {
    ProfilePolicy::new(profile)
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
