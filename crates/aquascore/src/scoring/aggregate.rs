use super::metric::Metric;
use super::primitives::clamp_score;
use super::scorers::MetricResult;
use serde::{Deserialize, Serialize};

/// Aggregate reported when no metric could be scored.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// A critical analyte below this score triggers the override.
pub const CRITICAL_FAILURE_SCORE: f64 = 30.0;
pub const CRITICAL_FAILURE_CEILING: f64 = 70.0;

/// Ceiling that limited the weighted mean, kept for transparency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreAdjustment {
    ConfidenceCap {
        valid_data_points: usize,
        ceiling: f64,
    },
    CriticalFailure {
        metrics: Vec<Metric>,
        ceiling: f64,
    },
}

impl ScoreAdjustment {
    pub fn ceiling(&self) -> f64 {
        match self {
            ScoreAdjustment::ConfidenceCap { ceiling, .. }
            | ScoreAdjustment::CriticalFailure { ceiling, .. } => *ceiling,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            ScoreAdjustment::ConfidenceCap {
                valid_data_points,
                ceiling,
            } => format!(
                "capped at {ceiling:.0}: only {valid_data_points} analyte(s) could be scored"
            ),
            ScoreAdjustment::CriticalFailure { metrics, ceiling } => {
                let names: Vec<&str> = metrics.iter().map(|metric| metric.label()).collect();
                format!(
                    "capped at {ceiling:.0}: critical failure on {}",
                    names.join(", ")
                )
            }
        }
    }
}

pub(crate) struct Aggregate {
    pub total_score: f64,
    pub valid_data_points: usize,
    pub adjustments: Vec<ScoreAdjustment>,
}

/// Ceiling applied for the number of scored analytes, if any.
pub fn confidence_ceiling(valid_data_points: usize) -> Option<f64> {
    match valid_data_points {
        0 | 1 => Some(40.0),
        2 | 3 => Some(60.0),
        4 | 5 => Some(85.0),
        _ => None,
    }
}

pub(crate) fn aggregate(results: &[MetricResult]) -> Aggregate {
    let active: Vec<&MetricResult> = results.iter().filter(|result| result.is_active()).collect();

    let total_weight: f64 = active.iter().map(|result| result.weight).sum();
    let mut total_score = if total_weight > 0.0 {
        active
            .iter()
            .map(|result| result.score * result.weight)
            .sum::<f64>()
            / total_weight
    } else {
        NEUTRAL_SCORE
    };

    let valid_data_points = active
        .iter()
        .filter(|result| !result.metric.is_meta())
        .count();
    let mut adjustments = Vec::new();

    // An empty analysis stays neutral rather than being capped as unreliable.
    if !active.is_empty() {
        if let Some(ceiling) = confidence_ceiling(valid_data_points) {
            if total_score > ceiling {
                total_score = ceiling;
                adjustments.push(ScoreAdjustment::ConfidenceCap {
                    valid_data_points,
                    ceiling,
                });
            }
        }
    }

    let failed: Vec<Metric> = active
        .iter()
        .filter(|result| result.metric.is_critical() && result.score < CRITICAL_FAILURE_SCORE)
        .map(|result| result.metric)
        .collect();
    if !failed.is_empty() && total_score > CRITICAL_FAILURE_CEILING {
        total_score = CRITICAL_FAILURE_CEILING;
        adjustments.push(ScoreAdjustment::CriticalFailure {
            metrics: failed,
            ceiling: CRITICAL_FAILURE_CEILING,
        });
    }

    Aggregate {
        total_score: clamp_score(total_score),
        valid_data_points,
        adjustments,
    }
}
