//! Profile policy: the single source of thresholds and weights.
//!
//! Scorers never hard-code cutoffs. They ask [`ProfilePolicy::rule`] for a
//! [`MetricPolicy`] and the same rule yields the target range shown to users.

use super::metric::Metric;
use super::primitives::{band_score, bell_score, step_bands, Band};
use super::profile::Profile;
use serde::Serialize;
use std::fmt;

const INF: f64 = f64::INFINITY;

/// Score at or above which a value counts as on target.
pub const TARGET_SCORE: f64 = 80.0;

/// Scoring strategy with its profile-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Bell {
        ideal: f64,
        tolerance: f64,
    },
    Band {
        min: f64,
        max: f64,
    },
    Ladder {
        bands: &'static [Band],
        higher_is_worse: bool,
    },
    /// Band falloff below `min`, full credit up to `max`, ascending ladder above.
    BandThenLadder {
        min: f64,
        max: f64,
        above: &'static [Band],
    },
}

/// Where a value sits relative to its rule's target range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Below,
    Within,
    Above,
}

impl Rule {
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            Rule::Bell { ideal, tolerance } => bell_score(value, ideal, tolerance),
            Rule::Band { min, max } => band_score(value, min, max),
            Rule::Ladder {
                bands,
                higher_is_worse,
            } => step_bands(value, bands, higher_is_worse),
            Rule::BandThenLadder { min, max, above } => {
                if value > max {
                    step_bands(value, above, true)
                } else {
                    band_score(value, min, max)
                }
            }
        }
    }

    pub fn target(&self) -> TargetRange {
        match *self {
            Rule::Bell { ideal, tolerance } => {
                let spread = tolerance * (1.0 - TARGET_SCORE / 100.0);
                TargetRange::between(ideal - spread, ideal + spread)
            }
            Rule::Band { min, max } | Rule::BandThenLadder { min, max, .. } => {
                TargetRange::between(min, max)
            }
            Rule::Ladder {
                bands,
                higher_is_worse,
            } => {
                let limit = bands
                    .iter()
                    .take_while(|band| band.score >= TARGET_SCORE)
                    .last()
                    .map(|band| band.limit)
                    .filter(|limit| limit.is_finite());
                if higher_is_worse {
                    TargetRange {
                        min: None,
                        max: limit,
                    }
                } else {
                    TargetRange {
                        min: limit,
                        max: None,
                    }
                }
            }
        }
    }

    pub fn position(&self, value: f64) -> Position {
        self.target().position(value)
    }
}

/// Range of values that scores in the top tier for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl TargetRange {
    fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min.max(0.0)),
            max: Some(max),
        }
    }

    pub fn position(&self, value: f64) -> Position {
        if self.min.is_some_and(|min| value < min) {
            Position::Below
        } else if self.max.is_some_and(|max| value > max) {
            Position::Above
        } else {
            Position::Within
        }
    }
}

impl fmt::Display for TargetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "{}-{}", trim(min), trim(max)),
            (None, Some(max)) => write!(f, "up to {}", trim(max)),
            (Some(min), None) => write!(f, "at least {}", trim(min)),
            (None, None) => f.write_str("any"),
        }
    }
}

fn trim(value: f64) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Rule and weight for one metric under one profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPolicy {
    pub rule: Rule,
    pub weight: f64,
}

const fn bell(ideal: f64, tolerance: f64, weight: f64) -> MetricPolicy {
    MetricPolicy {
        rule: Rule::Bell { ideal, tolerance },
        weight,
    }
}

const fn band(min: f64, max: f64, weight: f64) -> MetricPolicy {
    MetricPolicy {
        rule: Rule::Band { min, max },
        weight,
    }
}

const fn ceiling(bands: &'static [Band], weight: f64) -> MetricPolicy {
    MetricPolicy {
        rule: Rule::Ladder {
            bands,
            higher_is_worse: true,
        },
        weight,
    }
}

const fn floor(bands: &'static [Band], weight: f64) -> MetricPolicy {
    MetricPolicy {
        rule: Rule::Ladder {
            bands,
            higher_is_worse: false,
        },
        weight,
    }
}

const SODIUM_STRICT: [Band; 4] = [
    Band::new(10.0, 100.0),
    Band::new(20.0, 80.0),
    Band::new(50.0, 50.0),
    Band::new(200.0, 30.0),
];
const SODIUM_GENERAL: [Band; 3] = [
    Band::new(20.0, 100.0),
    Band::new(50.0, 80.0),
    Band::new(200.0, 50.0),
];

// Terminal tiers cover concentrations above the 50 mg/L drinking-water limit.
const NITRATE_STRICT: [Band; 4] = [
    Band::new(10.0, 100.0),
    Band::new(25.0, 60.0),
    Band::new(50.0, 30.0),
    Band::new(INF, 0.0),
];
const NITRATE_GENERAL: [Band; 3] = [
    Band::new(25.0, 100.0),
    Band::new(50.0, 60.0),
    Band::new(INF, 10.0),
];

const FLUORIDE_INFANT: [Band; 4] = [
    Band::new(0.3, 100.0),
    Band::new(0.7, 70.0),
    Band::new(1.0, 40.0),
    Band::new(INF, 20.0),
];
const FLUORIDE_GENERAL: [Band; 4] = [
    Band::new(1.5, 100.0),
    Band::new(2.0, 60.0),
    Band::new(4.0, 25.0),
    Band::new(INF, 10.0),
];
const FLUORIDE_ABOVE_FLUORIDATION: [Band; 4] = [
    Band::new(1.5, 80.0),
    Band::new(2.0, 60.0),
    Band::new(4.0, 25.0),
    Band::new(INF, 10.0),
];

const POTASSIUM_GENERAL: [Band; 4] = [
    Band::new(10.0, 100.0),
    Band::new(20.0, 80.0),
    Band::new(50.0, 50.0),
    Band::new(INF, 30.0),
];
const POTASSIUM_INFANT: [Band; 4] = [
    Band::new(5.0, 100.0),
    Band::new(10.0, 70.0),
    Band::new(20.0, 40.0),
    Band::new(INF, 20.0),
];
const POTASSIUM_RENAL: [Band; 4] = [
    Band::new(2.0, 100.0),
    Band::new(5.0, 70.0),
    Band::new(10.0, 40.0),
    Band::new(INF, 10.0),
];

const CHLORIDE_GENERAL: [Band; 4] = [
    Band::new(50.0, 100.0),
    Band::new(100.0, 80.0),
    Band::new(250.0, 50.0),
    Band::new(INF, 20.0),
];
const CHLORIDE_STRICT: [Band; 4] = [
    Band::new(25.0, 100.0),
    Band::new(50.0, 80.0),
    Band::new(150.0, 50.0),
    Band::new(INF, 20.0),
];
const CHLORIDE_COFFEE: [Band; 4] = [
    Band::new(30.0, 100.0),
    Band::new(70.0, 70.0),
    Band::new(150.0, 40.0),
    Band::new(INF, 10.0),
];

const SULFATE_GENERAL: [Band; 4] = [
    Band::new(100.0, 100.0),
    Band::new(250.0, 80.0),
    Band::new(500.0, 50.0),
    Band::new(INF, 20.0),
];
const SULFATE_SENSITIVE: [Band; 4] = [
    Band::new(50.0, 100.0),
    Band::new(100.0, 70.0),
    Band::new(200.0, 40.0),
    Band::new(INF, 10.0),
];
const SULFATE_COFFEE: [Band; 4] = [
    Band::new(50.0, 100.0),
    Band::new(100.0, 70.0),
    Band::new(250.0, 40.0),
    Band::new(INF, 10.0),
];

const BUFFER_GENERAL: [Band; 4] = [
    Band::new(8.0, 100.0),
    Band::new(4.0, 80.0),
    Band::new(1.5, 60.0),
    Band::new(0.5, 40.0),
];
const BUFFER_SPORT: [Band; 4] = [
    Band::new(20.0, 100.0),
    Band::new(10.0, 80.0),
    Band::new(5.0, 60.0),
    Band::new(1.0, 40.0),
];
const BUFFER_RENAL: [Band; 4] = [
    Band::new(10.0, 100.0),
    Band::new(5.0, 80.0),
    Band::new(2.0, 60.0),
    Band::new(0.5, 40.0),
];

const TDS_INFANT: [Band; 4] = [
    Band::new(200.0, 100.0),
    Band::new(500.0, 60.0),
    Band::new(1000.0, 30.0),
    Band::new(INF, 10.0),
];
const TDS_RENAL: [Band; 4] = [
    Band::new(300.0, 100.0),
    Band::new(600.0, 60.0),
    Band::new(1000.0, 30.0),
    Band::new(INF, 10.0),
];

const TASTE_GENERAL: [Band; 4] = [
    Band::new(2.0, 100.0),
    Band::new(1.0, 80.0),
    Band::new(0.5, 60.0),
    Band::new(0.2, 40.0),
];
const TASTE_COFFEE: [Band; 4] = [
    Band::new(1.5, 100.0),
    Band::new(0.8, 80.0),
    Band::new(0.4, 50.0),
    Band::new(0.1, 25.0),
];

const CARBONATION_GENERAL: [Band; 3] = [
    Band::new(1500.0, 100.0),
    Band::new(4000.0, 90.0),
    Band::new(INF, 80.0),
];
const CARBONATION_INFANT: [Band; 3] = [
    Band::new(100.0, 100.0),
    Band::new(1000.0, 50.0),
    Band::new(INF, 10.0),
];
const CARBONATION_COFFEE: [Band; 3] = [
    Band::new(100.0, 100.0),
    Band::new(500.0, 60.0),
    Band::new(INF, 20.0),
];
const CARBONATION_SPORT: [Band; 3] = [
    Band::new(1000.0, 100.0),
    Band::new(3000.0, 70.0),
    Band::new(INF, 50.0),
];

const TRANSPARENCY: [Band; 5] = [
    Band::new(80.0, 100.0),
    Band::new(60.0, 80.0),
    Band::new(40.0, 60.0),
    Band::new(20.0, 40.0),
    Band::new(0.0, 20.0),
];

const SODIUM_POTASSIUM_GENERAL: [Band; 4] = [
    Band::new(1.0, 100.0),
    Band::new(3.0, 80.0),
    Band::new(10.0, 50.0),
    Band::new(30.0, 30.0),
];
const SODIUM_POTASSIUM_STRICT: [Band; 4] = [
    Band::new(1.0, 100.0),
    Band::new(2.0, 80.0),
    Band::new(5.0, 50.0),
    Band::new(15.0, 20.0),
];

/// Thresholds and weights for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfilePolicy {
    pub profile: Profile,
    /// Score fluoride against the 0.6-1.2 mg/L fluoridation window.
    pub fluoridated_supply: bool,
}

impl ProfilePolicy {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            fluoridated_supply: false,
        }
    }

    pub fn with_fluoridated_supply(mut self, fluoridated_supply: bool) -> Self {
        self.fluoridated_supply = fluoridated_supply;
        self
    }

    pub fn target_range(&self, metric: Metric) -> TargetRange {
        self.rule(metric).rule.target()
    }

    pub fn rule(&self, metric: Metric) -> MetricPolicy {
        use Profile::*;

        let profile = self.profile;
        match metric {
            Metric::Ph => match profile {
                Infant => bell(7.2, 1.5, 1.0),
                Pregnancy => bell(7.3, 2.0, 1.0),
                Renal => bell(7.4, 2.0, 1.0),
                Coffee => bell(7.0, 1.5, 1.5),
                Standard | Sport | BloodPressure | Senior | Diabetes => bell(7.5, 2.5, 1.0),
            },
            Metric::Hardness => match profile {
                Infant => band(2.0, 8.0, 1.0),
                Sport => band(8.0, 18.0, 1.0),
                Renal => band(2.0, 10.0, 1.0),
                Coffee => band(3.0, 8.0, 2.0),
                Senior => band(8.0, 16.0, 1.0),
                Standard | Pregnancy | BloodPressure | Diabetes => band(7.0, 14.0, 1.0),
            },
            Metric::Sodium => {
                if profile.is_sodium_sensitive() {
                    ceiling(&SODIUM_STRICT, 2.0)
                } else {
                    ceiling(&SODIUM_GENERAL, 1.0)
                }
            }
            Metric::Nitrate => {
                if profile.is_nitrate_sensitive() {
                    ceiling(&NITRATE_STRICT, 2.0)
                } else {
                    ceiling(&NITRATE_GENERAL, 1.0)
                }
            }
            Metric::Calcium => match profile {
                Infant => band(10.0, 60.0, 1.0),
                Pregnancy => band(80.0, 200.0, 1.5),
                Sport => band(100.0, 300.0, 1.5),
                Renal => band(20.0, 80.0, 1.5),
                Coffee => band(20.0, 60.0, 1.5),
                Senior => band(100.0, 250.0, 1.5),
                Standard | BloodPressure | Diabetes => band(50.0, 150.0, 1.0),
            },
            Metric::Magnesium => match profile {
                Infant => band(5.0, 30.0, 1.0),
                Pregnancy | BloodPressure => band(30.0, 100.0, 1.5),
                Sport => band(50.0, 150.0, 1.5),
                Renal => band(5.0, 30.0, 1.5),
                Coffee => band(10.0, 30.0, 1.5),
                Senior => band(30.0, 100.0, 1.0),
                Diabetes => band(50.0, 120.0, 1.5),
                Standard => band(20.0, 80.0, 1.0),
            },
            Metric::Potassium => match profile {
                Infant => ceiling(&POTASSIUM_INFANT, 1.0),
                Renal => ceiling(&POTASSIUM_RENAL, 2.0),
                _ => ceiling(&POTASSIUM_GENERAL, 0.5),
            },
            Metric::Chloride => match profile {
                Infant | BloodPressure | Renal => ceiling(&CHLORIDE_STRICT, 1.0),
                Coffee => ceiling(&CHLORIDE_COFFEE, 1.0),
                _ => ceiling(&CHLORIDE_GENERAL, 0.5),
            },
            Metric::Sulfate => match profile {
                Infant => ceiling(&SULFATE_SENSITIVE, 1.5),
                Pregnancy | Renal => ceiling(&SULFATE_GENERAL, 1.0),
                Coffee => ceiling(&SULFATE_COFFEE, 1.0),
                _ => ceiling(&SULFATE_GENERAL, 0.5),
            },
            Metric::Bicarbonate => match profile {
                Infant => band(50.0, 300.0, 1.0),
                Sport => band(300.0, 1500.0, 1.5),
                Renal => band(300.0, 1200.0, 1.5),
                Coffee => band(40.0, 120.0, 2.0),
                Senior => band(200.0, 800.0, 1.0),
                Standard | Pregnancy | BloodPressure | Diabetes => band(100.0, 500.0, 1.0),
            },
            Metric::BufferCapacity => match profile {
                Sport => floor(&BUFFER_SPORT, 1.5),
                Renal => floor(&BUFFER_RENAL, 1.0),
                Coffee => band(0.6, 1.5, 1.5),
                _ => floor(&BUFFER_GENERAL, 0.5),
            },
            Metric::Tds => match profile {
                Infant => ceiling(&TDS_INFANT, 1.5),
                Renal => ceiling(&TDS_RENAL, 1.5),
                Sport => band(300.0, 1500.0, 1.0),
                Coffee => band(75.0, 250.0, 2.0),
                Senior => band(100.0, 800.0, 1.0),
                Standard | Pregnancy | BloodPressure | Diabetes => band(50.0, 500.0, 1.0),
            },
            Metric::TasteBalance => match profile {
                Coffee => floor(&TASTE_COFFEE, 1.5),
                _ => floor(&TASTE_GENERAL, 0.5),
            },
            Metric::Fluoride => match profile {
                Infant => ceiling(&FLUORIDE_INFANT, 2.0),
                _ => {
                    let weight = if profile == Pregnancy { 1.5 } else { 1.0 };
                    if self.fluoridated_supply {
                        MetricPolicy {
                            rule: Rule::BandThenLadder {
                                min: 0.6,
                                max: 1.2,
                                above: &FLUORIDE_ABOVE_FLUORIDATION,
                            },
                            weight,
                        }
                    } else {
                        ceiling(&FLUORIDE_GENERAL, weight)
                    }
                }
            },
            Metric::Silica => match profile {
                Senior => band(10.0, 50.0, 1.0),
                _ => band(5.0, 40.0, 0.5),
            },
            Metric::Carbonation => match profile {
                Infant => ceiling(&CARBONATION_INFANT, 1.5),
                Coffee => ceiling(&CARBONATION_COFFEE, 1.5),
                Sport => ceiling(&CARBONATION_SPORT, 0.5),
                _ => ceiling(&CARBONATION_GENERAL, 0.5),
            },
            Metric::DataTransparency => floor(&TRANSPARENCY, 0.5),
            Metric::CalciumMagnesiumRatio => match profile {
                Sport | Senior => bell(2.0, 2.0, 1.0),
                _ => bell(2.0, 3.0, 0.5),
            },
            Metric::SodiumPotassiumRatio => match profile {
                BloodPressure | Renal => ceiling(&SODIUM_POTASSIUM_STRICT, 1.5),
                _ => ceiling(&SODIUM_POTASSIUM_GENERAL, 0.5),
            },
        }
    }
}
