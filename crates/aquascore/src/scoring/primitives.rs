//! Numeric-to-score transforms shared by every metric scorer.

use serde::Serialize;

pub const MAX_SCORE: f64 = 100.0;

/// Share of full credit kept just outside a band.
const OUT_OF_BAND_FACTOR: f64 = 0.6;

/// One tier of a threshold ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub limit: f64,
    pub score: f64,
}

impl Band {
    pub const fn new(limit: f64, score: f64) -> Self {
        Self { limit, score }
    }
}

pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, MAX_SCORE)
}

/// Triangular falloff around `ideal`, reaching zero at `tolerance` distance.
pub fn bell_score(value: f64, ideal: f64, tolerance: f64) -> f64 {
    if tolerance <= 0.0 {
        return if value == ideal { MAX_SCORE } else { 0.0 };
    }

    let distance = (value - ideal).abs();
    if distance >= tolerance {
        return 0.0;
    }
    clamp_score(MAX_SCORE * (1.0 - distance / tolerance))
}

/// Full credit inside `[min, max]`, at most 60 outside and decaying with distance.
pub fn band_score(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        if min <= 0.0 {
            return 0.0;
        }
        return clamp_score(MAX_SCORE * (value / min) * OUT_OF_BAND_FACTOR);
    }

    if value > max {
        if value <= 0.0 {
            return 0.0;
        }
        return clamp_score(MAX_SCORE * (max / value) * OUT_OF_BAND_FACTOR);
    }

    MAX_SCORE
}

/// Score of the first band whose limit `value` satisfies.
///
/// Bands are ascending when `higher_is_worse` (match on `value <= limit`) and
/// descending otherwise (match on `value >= limit`). Falls back to the last
/// band's score when nothing matches.
pub fn step_bands(value: f64, bands: &[Band], higher_is_worse: bool) -> f64 {
    let matched = bands.iter().find(|band| {
        if higher_is_worse {
            value <= band.limit
        } else {
            value >= band.limit
        }
    });

    match matched.or_else(|| bands.last()) {
        Some(band) => clamp_score(band.score),
        None => 0.0,
    }
}
