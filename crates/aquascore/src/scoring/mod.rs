//! Water quality scoring engine.
//!
//! Pipeline: sanitize readings, compute [`DerivedReadings`], run the 19
//! per-metric scorers against the active [`ProfilePolicy`], then aggregate with
//! confidence capping and the critical-failure override. Every step is pure, so
//! one [`ScoringEngine`] can be shared freely across threads.

mod aggregate;
mod batch;
pub mod derived;
mod metric;
pub mod policy;
pub mod primitives;
mod profile;
mod readings;
mod router;
pub mod scorers;

#[cfg(test)]
mod tests;

pub use aggregate::{
    confidence_ceiling, ScoreAdjustment, CRITICAL_FAILURE_CEILING, CRITICAL_FAILURE_SCORE,
    NEUTRAL_SCORE,
};
pub use batch::{ScanRecord, ScoredScan};
pub use derived::DerivedReadings;
pub use metric::Metric;
pub use policy::{MetricPolicy, ProfilePolicy, Rule, TargetRange};
pub use profile::{Profile, UnknownProfile};
pub use readings::{parse_measurement, Analyte, AnalyteReadings};
pub use router::scoring_router;
pub use scorers::{MetricResult, Tier};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Engine settings that are not tied to a consumer profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// The water comes from a fluoridated public supply.
    #[serde(default)]
    pub fluoridated_supply: bool,
}

/// Stateless scorer applying the profile policy to a set of readings.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn policy(&self, profile: Profile) -> ProfilePolicy {
        ProfilePolicy::new(profile).with_fluoridated_supply(self.config.fluoridated_supply)
    }

    pub fn score(&self, readings: &AnalyteReadings, profile: Profile) -> ScoreResult {
        let readings = readings.sanitized();
        let derived = DerivedReadings::from_readings(&readings);
        let policy = self.policy(profile);

        let metrics = scorers::score_all(&readings, &derived, &policy);
        let aggregate = aggregate::aggregate(&metrics);

        for adjustment in &aggregate.adjustments {
            debug!(%profile, adjustment = %adjustment.summary(), "score ceiling applied");
        }

        ScoreResult {
            profile,
            total_score: aggregate.total_score,
            valid_data_points: aggregate.valid_data_points,
            adjustments: aggregate.adjustments,
            derived,
            metrics,
        }
    }
}

/// Scores `readings` for `profile` with the default engine settings.
pub fn calculate_scores(readings: &AnalyteReadings, profile: Profile) -> ScoreResult {
    ScoringEngine::default().score(readings, profile)
}

/// Overall verdict bucket for a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityRating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

/// Result of one scoring call. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub profile: Profile,
    pub total_score: f64,
    /// Active metrics excluding data transparency.
    pub valid_data_points: usize,
    pub adjustments: Vec<ScoreAdjustment>,
    pub derived: DerivedReadings,
    /// One entry per scorer in [`Metric::ordered`] order, including inactive ones.
    pub metrics: Vec<MetricResult>,
}

impl ScoreResult {
    pub fn rating(&self) -> QualityRating {
        QualityRating::from_score(self.total_score)
    }

    pub fn metric(&self, metric: Metric) -> Option<&MetricResult> {
        self.metrics.iter().find(|result| result.metric == metric)
    }

    pub fn active_metrics(&self) -> impl Iterator<Item = &MetricResult> {
        self.metrics.iter().filter(|result| result.is_active())
    }
}
