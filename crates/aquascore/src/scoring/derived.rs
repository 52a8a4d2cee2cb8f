//! Secondary quantities computed from raw analyte concentrations.
//!
//! Each function returns `None` when its inputs are missing, or when a ratio
//! would divide by zero.

use super::readings::{Analyte, AnalyteReadings};
use serde::{Deserialize, Serialize};

const CALCIUM_PER_GERMAN_DEGREE: f64 = 7.14;
const MAGNESIUM_PER_GERMAN_DEGREE: f64 = 4.32;
const BICARBONATE_MG_PER_MEQ: f64 = 61.0;

/// Derived quantities, computed once per scoring call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedReadings {
    /// German degrees (°dH).
    pub hardness: Option<f64>,
    pub calcium_magnesium_ratio: Option<f64>,
    pub sodium_potassium_ratio: Option<f64>,
    pub taste_balance: Option<f64>,
    /// Milliequivalents per liter.
    pub buffer_capacity: Option<f64>,
    pub data_completeness: f64,
    pub pral: Option<f64>,
}

impl DerivedReadings {
    pub fn from_readings(readings: &AnalyteReadings) -> Self {
        Self {
            hardness: hardness(readings),
            calcium_magnesium_ratio: calcium_magnesium_ratio(readings),
            sodium_potassium_ratio: sodium_potassium_ratio(readings),
            taste_balance: taste_balance(readings),
            buffer_capacity: buffer_capacity(readings),
            data_completeness: data_completeness(readings),
            pral: pral(readings),
        }
    }
}

pub fn hardness(readings: &AnalyteReadings) -> Option<f64> {
    let calcium = readings.calcium?;
    let magnesium = readings.magnesium?;
    Some(calcium / CALCIUM_PER_GERMAN_DEGREE + magnesium / MAGNESIUM_PER_GERMAN_DEGREE)
}

pub fn calcium_magnesium_ratio(readings: &AnalyteReadings) -> Option<f64> {
    ratio(readings.calcium?, readings.magnesium?)
}

pub fn sodium_potassium_ratio(readings: &AnalyteReadings) -> Option<f64> {
    ratio(readings.sodium?, readings.potassium?)
}

/// Bicarbonate against the bitter/salty anion load; high values taste round.
pub fn taste_balance(readings: &AnalyteReadings) -> Option<f64> {
    if readings.bicarbonate.is_none() && readings.sulfate.is_none() && readings.chloride.is_none()
    {
        return None;
    }

    let bicarbonate = readings.bicarbonate.unwrap_or(0.0);
    let load = readings.sulfate.unwrap_or(0.0) + readings.chloride.unwrap_or(0.0) + 1.0;
    if load == 0.0 {
        return None;
    }
    finite(bicarbonate / load)
}

pub fn buffer_capacity(readings: &AnalyteReadings) -> Option<f64> {
    readings
        .bicarbonate
        .map(|bicarbonate| bicarbonate / BICARBONATE_MG_PER_MEQ)
}

/// Share of the ten core analytes that were measured, in percent.
pub fn data_completeness(readings: &AnalyteReadings) -> f64 {
    readings.core_count() as f64 / Analyte::CORE.len() as f64 * 100.0
}

/// Potential renal acid load; negative values are base-forming.
pub fn pral(readings: &AnalyteReadings) -> Option<f64> {
    let inputs = [
        (readings.calcium, -0.013),
        (readings.magnesium, -0.026),
        (readings.sodium, 0.001),
        (readings.chloride, 0.003),
        (readings.bicarbonate, -0.002),
        (readings.potassium, -0.004),
    ];

    if inputs.iter().all(|(value, _)| value.is_none()) {
        return None;
    }

    Some(
        inputs
            .iter()
            .map(|(value, factor)| value.unwrap_or(0.0) * factor)
            .sum(),
    )
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    finite(numerator / denominator)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
