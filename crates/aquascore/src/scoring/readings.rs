use serde::{Deserialize, Deserializer, Serialize};

/// A single measurable water constituent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analyte {
    Ph,
    Calcium,
    Magnesium,
    Sodium,
    Potassium,
    Chloride,
    Sulfate,
    Bicarbonate,
    Nitrate,
    Fluoride,
    Silica,
    Carbonation,
    Tds,
}

impl Analyte {
    pub const ALL: [Self; 13] = [
        Self::Ph,
        Self::Calcium,
        Self::Magnesium,
        Self::Sodium,
        Self::Potassium,
        Self::Chloride,
        Self::Sulfate,
        Self::Bicarbonate,
        Self::Nitrate,
        Self::Fluoride,
        Self::Silica,
        Self::Carbonation,
        Self::Tds,
    ];

    /// Analytes counted by the data-completeness percentage.
    pub const CORE: [Self; 10] = [
        Self::Ph,
        Self::Calcium,
        Self::Magnesium,
        Self::Sodium,
        Self::Potassium,
        Self::Chloride,
        Self::Sulfate,
        Self::Bicarbonate,
        Self::Nitrate,
        Self::Tds,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Ph => "ph",
            Self::Calcium => "calcium",
            Self::Magnesium => "magnesium",
            Self::Sodium => "sodium",
            Self::Potassium => "potassium",
            Self::Chloride => "chloride",
            Self::Sulfate => "sulfate",
            Self::Bicarbonate => "bicarbonate",
            Self::Nitrate => "nitrate",
            Self::Fluoride => "fluoride",
            Self::Silica => "silica",
            Self::Carbonation => "carbonation",
            Self::Tds => "tds",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ph => "pH",
            Self::Calcium => "Calcium",
            Self::Magnesium => "Magnesium",
            Self::Sodium => "Sodium",
            Self::Potassium => "Potassium",
            Self::Chloride => "Chloride",
            Self::Sulfate => "Sulfate",
            Self::Bicarbonate => "Bicarbonate",
            Self::Nitrate => "Nitrate",
            Self::Fluoride => "Fluoride",
            Self::Silica => "Silica",
            Self::Carbonation => "Carbon dioxide",
            Self::Tds => "Total dissolved solids",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Ph => "",
            _ => "mg/L",
        }
    }
}

/// Sparse analyte concentrations. `None` means "not measured", never zero.
///
/// pH is unitless; every other field is in mg/L.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyteReadings {
    #[serde(deserialize_with = "measurement", skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(
        alias = "ca",
        deserialize_with = "measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub calcium: Option<f64>,
    #[serde(
        alias = "mg",
        deserialize_with = "measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub magnesium: Option<f64>,
    #[serde(
        alias = "na",
        deserialize_with = "measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub sodium: Option<f64>,
    #[serde(
        alias = "k",
        deserialize_with = "measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub potassium: Option<f64>,
    #[serde(
        alias = "cl",
        deserialize_with = "measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub chloride: Option<f64>,
    #[serde(
        alias = "so4",
        alias = "sulphate",
        deserialize_with = "measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub sulfate: Option<f64>,
    #[serde(
        alias = "hco3",
        deserialize_with = "measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub bicarbonate: Option<f64>,
    #[serde(
        alias = "no3",
        deserialize_with = "measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub nitrate: Option<f64>,
    #[serde(
        alias = "f",
        deserialize_with = "measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub fluoride: Option<f64>,
    #[serde(
        alias = "sio2",
        deserialize_with = "measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub silica: Option<f64>,
    #[serde(
        alias = "co2",
        deserialize_with = "measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub carbonation: Option<f64>,
    #[serde(
        alias = "total_dissolved_solids",
        deserialize_with = "measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub tds: Option<f64>,
}

impl AnalyteReadings {
    pub fn get(&self, analyte: Analyte) -> Option<f64> {
        match analyte {
            Analyte::Ph => self.ph,
            Analyte::Calcium => self.calcium,
            Analyte::Magnesium => self.magnesium,
            Analyte::Sodium => self.sodium,
            Analyte::Potassium => self.potassium,
            Analyte::Chloride => self.chloride,
            Analyte::Sulfate => self.sulfate,
            Analyte::Bicarbonate => self.bicarbonate,
            Analyte::Nitrate => self.nitrate,
            Analyte::Fluoride => self.fluoride,
            Analyte::Silica => self.silica,
            Analyte::Carbonation => self.carbonation,
            Analyte::Tds => self.tds,
        }
    }

    /// Stores `value`, normalizing non-finite numbers to absent.
    pub fn set(&mut self, analyte: Analyte, value: Option<f64>) {
        let value = value.filter(|number| number.is_finite());
        let slot = match analyte {
            Analyte::Ph => &mut self.ph,
            Analyte::Calcium => &mut self.calcium,
            Analyte::Magnesium => &mut self.magnesium,
            Analyte::Sodium => &mut self.sodium,
            Analyte::Potassium => &mut self.potassium,
            Analyte::Chloride => &mut self.chloride,
            Analyte::Sulfate => &mut self.sulfate,
            Analyte::Bicarbonate => &mut self.bicarbonate,
            Analyte::Nitrate => &mut self.nitrate,
            Analyte::Fluoride => &mut self.fluoride,
            Analyte::Silica => &mut self.silica,
            Analyte::Carbonation => &mut self.carbonation,
            Analyte::Tds => &mut self.tds,
        };
        *slot = value;
    }

    pub fn with(mut self, analyte: Analyte, value: f64) -> Self {
        self.set(analyte, Some(value));
        self
    }

    /// Copy with every NaN or infinite value replaced by "absent".
    pub fn sanitized(&self) -> Self {
        let mut clean = Self::default();
        for analyte in Analyte::ALL {
            clean.set(analyte, self.get(analyte));
        }
        clean
    }

    pub fn present(&self) -> impl Iterator<Item = (Analyte, f64)> + '_ {
        Analyte::ALL
            .into_iter()
            .filter_map(|analyte| self.get(analyte).map(|value| (analyte, value)))
    }

    pub fn core_count(&self) -> usize {
        Analyte::CORE
            .iter()
            .filter(|analyte| self.get(**analyte).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// Parses a measurement cell as it arrives from OCR or CSV exports.
///
/// Accepts a decimal comma and a trailing `mg/l` unit; anything that does not
/// yield a finite number is absent.
pub fn parse_measurement(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let lowered = trimmed.to_ascii_lowercase();
    let without_unit = lowered
        .strip_suffix("mg/l")
        .unwrap_or(&lowered)
        .trim()
        .replace(',', ".");

    without_unit
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn measurement_from_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        serde_json::Value::String(raw) => parse_measurement(raw),
        _ => None,
    }
}

fn measurement<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(measurement_from_value))
}
