//! Water quality scoring for mineral and tap water analyses.
//!
//! The [`scoring`] module holds the engine: sparse analyte readings go in, a
//! profile-aware 0-100 score with a per-metric breakdown comes out. The
//! remaining modules carry the service plumbing around it.

pub mod config;
pub mod error;
pub mod import;
pub mod scoring;
pub mod telemetry;

pub use scoring::{
    calculate_scores, AnalyteReadings, DerivedReadings, Metric, MetricResult, Profile,
    QualityRating, ScoreResult, ScoringConfig, ScoringEngine,
};
