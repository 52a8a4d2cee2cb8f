use aquascore::scoring::Analyte;
use aquascore::{AnalyteReadings, Profile};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reference analysis used by the demo command.
#[derive(Debug, Clone)]
pub(crate) struct SampleWater {
    pub(crate) name: &'static str,
    pub(crate) readings: AnalyteReadings,
    /// Profile the sample is usually marketed to.
    pub(crate) featured_profile: Profile,
}

pub(crate) fn sample_waters() -> Vec<SampleWater> {
    vec![
        SampleWater {
            name: "Alpine spring (still)",
            readings: AnalyteReadings::default()
                .with(Analyte::Ph, 7.6)
                .with(Analyte::Calcium, 64.0)
                .with(Analyte::Magnesium, 21.0)
                .with(Analyte::Sodium, 4.5)
                .with(Analyte::Potassium, 1.2)
                .with(Analyte::Chloride, 6.0)
                .with(Analyte::Sulfate, 14.0)
                .with(Analyte::Bicarbonate, 290.0)
                .with(Analyte::Nitrate, 3.1)
                .with(Analyte::Silica, 9.0)
                .with(Analyte::Tds, 310.0),
            featured_profile: Profile::Standard,
        },
        SampleWater {
            name: "Low-mineral baby water",
            readings: AnalyteReadings::default()
                .with(Analyte::Ph, 7.1)
                .with(Analyte::Calcium, 11.0)
                .with(Analyte::Magnesium, 3.5)
                .with(Analyte::Sodium, 2.8)
                .with(Analyte::Potassium, 0.6)
                .with(Analyte::Bicarbonate, 42.0)
                .with(Analyte::Nitrate, 1.0)
                .with(Analyte::Fluoride, 0.1)
                .with(Analyte::Tds, 60.0),
            featured_profile: Profile::Infant,
        },
        SampleWater {
            name: "Sparkling mineral (high sodium)",
            readings: AnalyteReadings::default()
                .with(Analyte::Ph, 5.9)
                .with(Analyte::Calcium, 150.0)
                .with(Analyte::Magnesium, 38.0)
                .with(Analyte::Sodium, 230.0)
                .with(Analyte::Potassium, 11.0)
                .with(Analyte::Chloride, 80.0)
                .with(Analyte::Bicarbonate, 1100.0)
                .with(Analyte::Carbonation, 5800.0)
                .with(Analyte::Tds, 1600.0),
            featured_profile: Profile::Sport,
        },
        SampleWater {
            name: "Private well (nitrate)",
            readings: AnalyteReadings::default()
                .with(Analyte::Ph, 7.0)
                .with(Analyte::Calcium, 88.0)
                .with(Analyte::Magnesium, 17.0)
                .with(Analyte::Sodium, 18.0)
                .with(Analyte::Nitrate, 62.0),
            featured_profile: Profile::Pregnancy,
        },
    ]
}
