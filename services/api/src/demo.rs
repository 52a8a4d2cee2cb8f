use crate::infra::sample_waters;
use aquascore::config::AppConfig;
use aquascore::error::AppError;
use aquascore::import::ScanImporter;
use aquascore::scoring::{Analyte, ScoreAdjustment, Tier};
use aquascore::{AnalyteReadings, MetricResult, Profile, QualityRating, ScoreResult, ScoringEngine};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Consumer profile to score for (defaults to AQUASCORE_DEFAULT_PROFILE)
    #[arg(long)]
    pub(crate) profile: Option<Profile>,
    /// JSON file with analyte readings; flags below override its values
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Print the result as JSON instead of a text breakdown
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) readings: ReadingArgs,
}

/// Per-analyte overrides, all in mg/L except pH.
#[derive(Args, Debug, Default)]
pub(crate) struct ReadingArgs {
    #[arg(long)]
    pub(crate) ph: Option<f64>,
    #[arg(long)]
    pub(crate) calcium: Option<f64>,
    #[arg(long)]
    pub(crate) magnesium: Option<f64>,
    #[arg(long)]
    pub(crate) sodium: Option<f64>,
    #[arg(long)]
    pub(crate) potassium: Option<f64>,
    #[arg(long)]
    pub(crate) chloride: Option<f64>,
    #[arg(long)]
    pub(crate) sulfate: Option<f64>,
    #[arg(long)]
    pub(crate) bicarbonate: Option<f64>,
    #[arg(long)]
    pub(crate) nitrate: Option<f64>,
    #[arg(long)]
    pub(crate) fluoride: Option<f64>,
    #[arg(long)]
    pub(crate) silica: Option<f64>,
    #[arg(long)]
    pub(crate) carbonation: Option<f64>,
    #[arg(long)]
    pub(crate) tds: Option<f64>,
}

impl ReadingArgs {
    fn overrides(&self) -> [(Analyte, Option<f64>); 13] {
        [
            (Analyte::Ph, self.ph),
            (Analyte::Calcium, self.calcium),
            (Analyte::Magnesium, self.magnesium),
            (Analyte::Sodium, self.sodium),
            (Analyte::Potassium, self.potassium),
            (Analyte::Chloride, self.chloride),
            (Analyte::Sulfate, self.sulfate),
            (Analyte::Bicarbonate, self.bicarbonate),
            (Analyte::Nitrate, self.nitrate),
            (Analyte::Fluoride, self.fluoride),
            (Analyte::Silica, self.silica),
            (Analyte::Carbonation, self.carbonation),
            (Analyte::Tds, self.tds),
        ]
    }

    pub(crate) fn apply_to(&self, mut readings: AnalyteReadings) -> AnalyteReadings {
        for (analyte, value) in self.overrides() {
            if value.is_some() {
                readings.set(analyte, value);
            }
        }
        readings
    }

    pub(crate) fn into_readings(self) -> AnalyteReadings {
        self.apply_to(AnalyteReadings::default())
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export of saved scans (label, profile and one column per analyte)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Profile for rows that leave the profile column blank
    #[arg(long)]
    pub(crate) profile: Option<Profile>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only show the reference waters scored for this profile.
    #[arg(long)]
    pub(crate) profile: Option<Profile>,
    /// Include the per-metric breakdown for every sample.
    #[arg(long)]
    pub(crate) details: bool,
}

#[derive(Debug, Serialize)]
struct ScoreReport<'a> {
    evaluated_at: DateTime<Utc>,
    rating: QualityRating,
    #[serde(flatten)]
    result: &'a ScoreResult,
}

fn configured_engine() -> Result<(ScoringEngine, Profile), AppError> {
    let config = AppConfig::load()?;
    let engine = ScoringEngine::new(config.scoring.engine_config());
    Ok((engine, config.scoring.default_profile))
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let (engine, default_profile) = configured_engine()?;
    let profile = args.profile.unwrap_or(default_profile);

    let base = match &args.file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<AnalyteReadings>(&raw)?
        }
        None => AnalyteReadings::default(),
    };
    let readings = args.readings.apply_to(base);

    let result = engine.score(&readings, profile);
    if args.json {
        let report = ScoreReport {
            evaluated_at: Utc::now(),
            rating: result.rating(),
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_score("Water analysis", &result, true);
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let (engine, default_profile) = configured_engine()?;
    let profile = args.profile.unwrap_or(default_profile);

    let scans = ScanImporter::from_path(&args.csv)?;
    let scored = engine.score_batch(&scans, profile);

    println!(
        "Re-scored {} scans from {} ({})",
        scored.len(),
        args.csv.display(),
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    );
    for scan in &scored {
        println!(
            "- {:<28} {:<16} {:>5.1}  {}{}",
            scan.label,
            scan.result.profile.slug(),
            scan.result.total_score,
            scan.result.rating().label(),
            if scan.result.adjustments.is_empty() {
                ""
            } else {
                "  (capped)"
            }
        );
    }

    if !scored.is_empty() {
        let mean = scored
            .iter()
            .map(|scan| scan.result.total_score)
            .sum::<f64>()
            / scored.len() as f64;
        println!("Average score {mean:.1}");
    }

    Ok(())
}

pub(crate) fn run_profiles() -> Result<(), AppError> {
    println!("Supported profiles");
    for profile in Profile::ordered() {
        let mut notes = Vec::new();
        if profile.is_sodium_sensitive() {
            notes.push("sodium-sensitive");
        }
        if profile.is_nitrate_sensitive() {
            notes.push("strict nitrate");
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" [{}]", notes.join(", "))
        };
        println!("- {:<16} {}{}", profile.slug(), profile.label(), notes);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { profile, details } = args;
    let (engine, _) = configured_engine()?;

    println!("Water scoring demo");
    for sample in sample_waters() {
        let featured = profile.unwrap_or(sample.featured_profile);
        let result = engine.score(&sample.readings, featured);
        println!();
        render_score(sample.name, &result, details);

        if profile.is_none() {
            let spread: Vec<String> = Profile::ordered()
                .into_iter()
                .map(|other| {
                    let total = engine.score(&sample.readings, other).total_score;
                    format!("{} {total:.0}", other.slug())
                })
                .collect();
            println!("  Across profiles: {}", spread.join(" | "));
        }
    }

    Ok(())
}

pub(crate) fn render_score(title: &str, result: &ScoreResult, details: bool) {
    println!(
        "{title}: {:.1}/100 ({}) for {} profile, {} data points",
        result.total_score,
        result.rating().label(),
        result.profile.label(),
        result.valid_data_points
    );

    for adjustment in &result.adjustments {
        let marker = match adjustment {
            ScoreAdjustment::ConfidenceCap { .. } => "Confidence",
            ScoreAdjustment::CriticalFailure { .. } => "Critical",
        };
        println!("  ! {marker}: {}", adjustment.summary());
    }

    if !details {
        return;
    }

    for metric in result.active_metrics() {
        println!("  {}", metric_line(metric));
    }
}

fn metric_line(metric: &MetricResult) -> String {
    let marker = match metric.tier() {
        Tier::Good => "+",
        Tier::Acceptable => "~",
        Tier::Concerning => "-",
    };
    let value = metric
        .value
        .map(|value| format_reading(value, metric.metric.unit()))
        .unwrap_or_default();
    format!(
        "{marker} {:<24} {:>12} {:>5.0}  {}",
        metric.metric.label(),
        value,
        metric.score,
        metric.explanation
    )
}

fn format_reading(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{value:.2}")
    } else {
        format!("{value:.1} {unit}")
    }
}
