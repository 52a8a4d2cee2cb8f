use serde::{Deserialize, Serialize};

/// Every quantity the engine scores, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Ph,
    Hardness,
    Sodium,
    Nitrate,
    Calcium,
    Magnesium,
    Potassium,
    Chloride,
    Sulfate,
    Bicarbonate,
    BufferCapacity,
    Tds,
    TasteBalance,
    Fluoride,
    Silica,
    Carbonation,
    DataTransparency,
    CalciumMagnesiumRatio,
    SodiumPotassiumRatio,
}

impl Metric {
    pub const fn ordered() -> [Self; 19] {
        [
            Self::Ph,
            Self::Hardness,
            Self::Sodium,
            Self::Nitrate,
            Self::Calcium,
            Self::Magnesium,
            Self::Potassium,
            Self::Chloride,
            Self::Sulfate,
            Self::Bicarbonate,
            Self::BufferCapacity,
            Self::Tds,
            Self::TasteBalance,
            Self::Fluoride,
            Self::Silica,
            Self::Carbonation,
            Self::DataTransparency,
            Self::CalciumMagnesiumRatio,
            Self::SodiumPotassiumRatio,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ph => "pH",
            Self::Hardness => "Hardness",
            Self::Sodium => "Sodium",
            Self::Nitrate => "Nitrate",
            Self::Calcium => "Calcium",
            Self::Magnesium => "Magnesium",
            Self::Potassium => "Potassium",
            Self::Chloride => "Chloride",
            Self::Sulfate => "Sulfate",
            Self::Bicarbonate => "Bicarbonate",
            Self::BufferCapacity => "Buffer capacity",
            Self::Tds => "Total dissolved solids",
            Self::TasteBalance => "Taste balance",
            Self::Fluoride => "Fluoride",
            Self::Silica => "Silica",
            Self::Carbonation => "Carbonation",
            Self::DataTransparency => "Data transparency",
            Self::CalciumMagnesiumRatio => "Ca:Mg ratio",
            Self::SodiumPotassiumRatio => "Na:K ratio",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Ph
            | Self::TasteBalance
            | Self::CalciumMagnesiumRatio
            | Self::SodiumPotassiumRatio => "",
            Self::Hardness => "°dH",
            Self::BufferCapacity => "mmol/L",
            Self::DataTransparency => "%",
            _ => "mg/L",
        }
    }

    /// Analytes whose failure caps the aggregate regardless of the mean.
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Nitrate | Self::Sodium | Self::Fluoride)
    }

    /// The data-transparency metric describes the analysis, not the water.
    pub const fn is_meta(self) -> bool {
        matches!(self, Self::DataTransparency)
    }

    pub(crate) fn format_value(self, value: f64) -> String {
        match self {
            Self::Ph => format!("{value:.1}"),
            Self::TasteBalance | Self::CalciumMagnesiumRatio | Self::SodiumPotassiumRatio => {
                format!("{value:.2}")
            }
            Self::Fluoride | Self::BufferCapacity => format!("{value:.2} {}", self.unit()),
            Self::DataTransparency => format!("{value:.0}{}", self.unit()),
            _ => format!("{value:.1} {}", self.unit()),
        }
    }
}
