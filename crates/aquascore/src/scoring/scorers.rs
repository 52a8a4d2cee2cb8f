//! Per-metric scorers.
//!
//! Every scorer has the same contract: an absent input yields score 0 and
//! weight 0 with an "unknown" explanation; a present input is scored with the
//! profile's rule and explained by score tier.

use super::derived::DerivedReadings;
use super::metric::Metric;
use super::policy::{Position, ProfilePolicy, TargetRange};
use super::primitives::clamp_score;
use super::readings::AnalyteReadings;
use serde::{Deserialize, Serialize};

/// One scorer's contribution to the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub metric: Metric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub score: f64,
    pub weight: f64,
    pub explanation: String,
}

impl MetricResult {
    pub fn unknown(metric: Metric) -> Self {
        Self {
            metric,
            value: None,
            score: 0.0,
            weight: 0.0,
            explanation: format!("{} unknown", metric.label()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.weight > 0.0
    }

    pub fn tier(&self) -> Tier {
        Tier::from_score(self.score)
    }
}

/// Score bracket used to phrase explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Good,
    Acceptable,
    Concerning,
}

impl Tier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Acceptable
        } else {
            Self::Concerning
        }
    }
}

struct Assessment<'a> {
    shown: String,
    tier: Tier,
    position: Position,
    target: TargetRange,
    profile: &'a str,
}

fn assess(
    metric: Metric,
    value: Option<f64>,
    policy: &ProfilePolicy,
    explain: fn(&Assessment<'_>) -> String,
) -> MetricResult {
    let Some(value) = value.filter(|value| value.is_finite()) else {
        return MetricResult::unknown(metric);
    };

    let metric_policy = policy.rule(metric);
    let score = clamp_score(metric_policy.rule.apply(value));
    let assessment = Assessment {
        shown: metric.format_value(value),
        tier: Tier::from_score(score),
        position: metric_policy.rule.position(value),
        target: metric_policy.rule.target(),
        profile: policy.profile.label(),
    };

    MetricResult {
        metric,
        value: Some(value),
        score,
        weight: metric_policy.weight,
        explanation: explain(&assessment),
    }
}

/// Runs every scorer in [`Metric::ordered`] order.
pub fn score_all(
    readings: &AnalyteReadings,
    derived: &DerivedReadings,
    policy: &ProfilePolicy,
) -> Vec<MetricResult> {
    Metric::ordered()
        .into_iter()
        .map(|metric| score_metric(metric, readings, derived, policy))
        .collect()
}

pub fn score_metric(
    metric: Metric,
    readings: &AnalyteReadings,
    derived: &DerivedReadings,
    policy: &ProfilePolicy,
) -> MetricResult {
    match metric {
        Metric::Ph => ph(readings.ph, policy),
        Metric::Hardness => hardness(derived.hardness, policy),
        Metric::Sodium => sodium(readings.sodium, policy),
        Metric::Nitrate => nitrate(readings.nitrate, policy),
        Metric::Calcium => calcium(readings.calcium, policy),
        Metric::Magnesium => magnesium(readings.magnesium, policy),
        Metric::Potassium => potassium(readings.potassium, policy),
        Metric::Chloride => chloride(readings.chloride, policy),
        Metric::Sulfate => sulfate(readings.sulfate, policy),
        Metric::Bicarbonate => bicarbonate(readings.bicarbonate, policy),
        Metric::BufferCapacity => buffer_capacity(derived.buffer_capacity, policy),
        Metric::Tds => tds(readings.tds, policy),
        Metric::TasteBalance => taste_balance(derived.taste_balance, policy),
        Metric::Fluoride => fluoride(readings.fluoride, policy),
        Metric::Silica => silica(readings.silica, policy),
        Metric::Carbonation => carbonation(readings.carbonation, policy),
        // Completeness is always computable; with nothing measured there is nothing to vouch for.
        Metric::DataTransparency => data_transparency(
            Some(derived.data_completeness).filter(|completeness| *completeness > 0.0),
            policy,
        ),
        Metric::CalciumMagnesiumRatio => {
            calcium_magnesium_ratio(derived.calcium_magnesium_ratio, policy)
        }
        Metric::SodiumPotassiumRatio => {
            sodium_potassium_ratio(derived.sodium_potassium_ratio, policy)
        }
    }
}

pub fn ph(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Ph, value, policy, |a| match (a.tier, a.position) {
        (Tier::Good, _) => format!("pH {} is close to the ideal {} range", a.shown, a.target),
        (Tier::Acceptable, Position::Below) => {
            format!("pH {} is slightly acidic (target {})", a.shown, a.target)
        }
        (Tier::Acceptable, _) => {
            format!("pH {} is slightly alkaline (target {})", a.shown, a.target)
        }
        (Tier::Concerning, Position::Below) => format!(
            "pH {} is markedly acidic for the {} profile",
            a.shown, a.profile
        ),
        (Tier::Concerning, _) => format!(
            "pH {} is markedly alkaline for the {} profile",
            a.shown, a.profile
        ),
    })
}

pub fn hardness(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Hardness, value, policy, |a| {
        let character = match a.position {
            Position::Below => "soft",
            Position::Within => "medium-hard",
            Position::Above => "hard",
        };
        match a.tier {
            Tier::Good => format!(
                "Hardness {} is within the {} °dH target",
                a.shown, a.target
            ),
            Tier::Acceptable => format!(
                "Hardness {} is {} but acceptable (target {} °dH)",
                a.shown, character, a.target
            ),
            Tier::Concerning => format!(
                "Hardness {} is very {} for the {} profile",
                a.shown, character, a.profile
            ),
        }
    })
}

pub fn sodium(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Sodium, value, policy, |a| match a.tier {
        Tier::Good => format!("Sodium {} is low", a.shown),
        Tier::Acceptable => format!(
            "Sodium {} is moderate; {} mg/L or less is preferred for the {} profile",
            a.shown,
            a.target.max.unwrap_or_default(),
            a.profile
        ),
        Tier::Concerning => format!(
            "Sodium {} is elevated for the {} profile",
            a.shown, a.profile
        ),
    })
}

pub fn nitrate(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Nitrate, value, policy, |a| match a.tier {
        Tier::Good => format!("Nitrate {} is well below health limits", a.shown),
        Tier::Acceptable => format!(
            "Nitrate {} is noticeable but within the drinking-water limit",
            a.shown
        ),
        Tier::Concerning => format!(
            "Nitrate {} is concerning for the {} profile",
            a.shown, a.profile
        ),
    })
}

pub fn calcium(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Calcium, value, policy, |a| {
        mineral_explanation("Calcium", a, "contributes little calcium")
    })
}

pub fn magnesium(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Magnesium, value, policy, |a| {
        mineral_explanation("Magnesium", a, "contributes little magnesium")
    })
}

fn mineral_explanation(name: &str, a: &Assessment<'_>, low_note: &str) -> String {
    match (a.tier, a.position) {
        (Tier::Good, _) => format!("{name} {} is in the {} mg/L target", a.shown, a.target),
        (_, Position::Below) => format!(
            "{name} {} is below the {} mg/L target and {low_note}",
            a.shown, a.target
        ),
        (Tier::Acceptable, _) => format!(
            "{name} {} is above the {} mg/L target",
            a.shown, a.target
        ),
        (Tier::Concerning, _) => format!(
            "{name} {} is far above the {} mg/L target for the {} profile",
            a.shown, a.target, a.profile
        ),
    }
}

pub fn potassium(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Potassium, value, policy, |a| match a.tier {
        Tier::Good => format!("Potassium {} is unremarkable", a.shown),
        Tier::Acceptable => format!("Potassium {} is moderately elevated", a.shown),
        Tier::Concerning => format!(
            "Potassium {} is high for the {} profile",
            a.shown, a.profile
        ),
    })
}

pub fn chloride(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Chloride, value, policy, |a| match a.tier {
        Tier::Good => format!("Chloride {} is low", a.shown),
        Tier::Acceptable => format!("Chloride {} may taste slightly salty", a.shown),
        Tier::Concerning => format!("Chloride {} is elevated and tastes salty", a.shown),
    })
}

pub fn sulfate(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Sulfate, value, policy, |a| match a.tier {
        Tier::Good => format!("Sulfate {} is low", a.shown),
        Tier::Acceptable => format!("Sulfate {} may taste bitter", a.shown),
        Tier::Concerning => format!(
            "Sulfate {} is elevated and can have a laxative effect",
            a.shown
        ),
    })
}

pub fn bicarbonate(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Bicarbonate, value, policy, |a| {
        match (a.tier, a.position) {
            (Tier::Good, _) => format!(
                "Bicarbonate {} is in the {} mg/L target",
                a.shown, a.target
            ),
            (_, Position::Below) => format!(
                "Bicarbonate {} offers little buffering (target {} mg/L)",
                a.shown, a.target
            ),
            (_, _) => format!(
                "Bicarbonate {} is high for the {} profile (target {} mg/L)",
                a.shown, a.profile, a.target
            ),
        }
    })
}

pub fn buffer_capacity(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::BufferCapacity, value, policy, |a| {
        match (a.tier, a.position) {
            (Tier::Good, _) => format!("Buffer capacity {} neutralizes acid well", a.shown),
            (_, Position::Above) => format!(
                "Buffer capacity {} is stronger than ideal ({})",
                a.shown, a.target
            ),
            (Tier::Acceptable, _) => format!("Buffer capacity {} is moderate", a.shown),
            (Tier::Concerning, _) => format!("Buffer capacity {} is weak", a.shown),
        }
    })
}

pub fn tds(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Tds, value, policy, |a| match (a.tier, a.position) {
        (Tier::Good, _) => format!("Total dissolved solids {} are balanced", a.shown),
        (_, Position::Below) => format!(
            "Total dissolved solids {} indicate a very lightly mineralized water",
            a.shown
        ),
        (Tier::Acceptable, _) => format!(
            "Total dissolved solids {} indicate a strongly mineralized water",
            a.shown
        ),
        (Tier::Concerning, _) => format!(
            "Total dissolved solids {} are too high for the {} profile",
            a.shown, a.profile
        ),
    })
}

pub fn taste_balance(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::TasteBalance, value, policy, |a| match a.tier {
        Tier::Good => format!("Taste balance {} suggests a soft, round taste", a.shown),
        Tier::Acceptable => format!("Taste balance {} suggests a neutral taste", a.shown),
        Tier::Concerning => format!(
            "Taste balance {} suggests a bitter or salty taste",
            a.shown
        ),
    })
}

pub fn fluoride(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Fluoride, value, policy, |a| match (a.tier, a.position) {
        (Tier::Good, _) => format!(
            "Fluoride {} is within the recommended range ({} mg/L)",
            a.shown, a.target
        ),
        (_, Position::Below) => format!(
            "Fluoride {} is below the {} mg/L fluoridation window",
            a.shown, a.target
        ),
        (Tier::Acceptable, _) => format!("Fluoride {} is somewhat elevated", a.shown),
        (Tier::Concerning, _) => format!(
            "Fluoride {} is too high for the {} profile",
            a.shown, a.profile
        ),
    })
}

pub fn silica(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Silica, value, policy, |a| match (a.tier, a.position) {
        (Tier::Good, _) => format!("Silica {} is in the {} mg/L target", a.shown, a.target),
        (_, Position::Below) => format!("Silica {} is low", a.shown),
        (_, _) => format!("Silica {} is unusually high", a.shown),
    })
}

pub fn carbonation(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::Carbonation, value, policy, |a| match a.tier {
        Tier::Good => format!("Carbonation {} suits the {} profile", a.shown, a.profile),
        Tier::Acceptable => format!("Carbonation {} is noticeable", a.shown),
        Tier::Concerning => format!(
            "Carbonation {} is not recommended for the {} profile",
            a.shown, a.profile
        ),
    })
}

pub fn data_transparency(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::DataTransparency, value, policy, |a| match a.tier {
        Tier::Good => format!("{} of core analytes reported", a.shown),
        Tier::Acceptable => format!(
            "{} of core analytes reported; some values are missing",
            a.shown
        ),
        Tier::Concerning => format!(
            "Only {} of core analytes reported; the score is less reliable",
            a.shown
        ),
    })
}

pub fn calcium_magnesium_ratio(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::CalciumMagnesiumRatio, value, policy, |a| {
        match (a.tier, a.position) {
            (Tier::Good, _) => format!("Ca:Mg ratio {} is close to the ideal 2:1", a.shown),
            (_, Position::Below) => format!("Ca:Mg ratio {} is magnesium-heavy", a.shown),
            (_, _) => format!("Ca:Mg ratio {} is calcium-heavy", a.shown),
        }
    })
}

pub fn sodium_potassium_ratio(value: Option<f64>, policy: &ProfilePolicy) -> MetricResult {
    assess(Metric::SodiumPotassiumRatio, value, policy, |a| match a.tier {
        Tier::Good => format!("Na:K ratio {} is favourable", a.shown),
        Tier::Acceptable => format!("Na:K ratio {} leans towards sodium", a.shown),
        Tier::Concerning => format!(
            "Na:K ratio {} is sodium-dominated for the {} profile",
            a.shown, a.profile
        ),
    })
}
