use super::{AnalyteReadings, Profile, ScoreResult, ScoringEngine};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A stored scan awaiting (re)scoring, e.g. from a history export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub readings: AnalyteReadings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredScan {
    pub label: String,
    pub result: ScoreResult,
}

impl ScoringEngine {
    /// Scores scans in parallel, preserving input order.
    ///
    /// Scans without their own profile use `default_profile`.
    pub fn score_batch(&self, scans: &[ScanRecord], default_profile: Profile) -> Vec<ScoredScan> {
        scans
            .par_iter()
            .map(|scan| ScoredScan {
                label: scan.label.clone(),
                result: self.score(&scan.readings, scan.profile.unwrap_or(default_profile)),
            })
            .collect()
    }
}
