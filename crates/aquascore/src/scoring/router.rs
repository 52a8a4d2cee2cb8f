use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{
    AnalyteReadings, Metric, Profile, QualityRating, ScoreResult, ScoringEngine, TargetRange,
};
use crate::error::AppError;
use crate::import::ScanImporter;

#[derive(Clone)]
struct ScoringState {
    engine: Arc<ScoringEngine>,
    default_profile: Profile,
}

/// Router exposing the scoring engine over HTTP.
pub fn scoring_router(engine: Arc<ScoringEngine>, default_profile: Profile) -> Router {
    Router::new()
        .route("/api/v1/water/profiles", get(profiles_handler))
        .route(
            "/api/v1/water/profiles/:profile/targets",
            get(targets_handler),
        )
        .route("/api/v1/water/score", post(score_handler))
        .route("/api/v1/water/score/batch", post(batch_handler))
        .with_state(ScoringState {
            engine,
            default_profile,
        })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileView {
    pub profile: Profile,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct TargetView {
    pub metric: Metric,
    pub label: String,
    pub unit: String,
    pub weight: f64,
    pub target: TargetRange,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub readings: AnalyteReadings,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub rating: QualityRating,
    #[serde(flatten)]
    pub result: ScoreResult,
}

impl From<ScoreResult> for ScoreResponse {
    fn from(result: ScoreResult) -> Self {
        Self {
            rating: result.rating(),
            result,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub profile: Option<Profile>,
    pub csv: String,
}

#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub label: String,
    #[serde(flatten)]
    pub score: ScoreResponse,
}

async fn profiles_handler() -> Json<Vec<ProfileView>> {
    Json(
        Profile::ordered()
            .into_iter()
            .map(|profile| ProfileView {
                profile,
                label: profile.label().to_string(),
            })
            .collect(),
    )
}

async fn targets_handler(
    State(state): State<ScoringState>,
    Path(profile): Path<String>,
) -> Result<Json<Vec<TargetView>>, AppError> {
    let profile = profile.parse::<Profile>()?;
    let policy = state.engine.policy(profile);

    let targets = Metric::ordered()
        .into_iter()
        .map(|metric| {
            let rule = policy.rule(metric);
            TargetView {
                metric,
                label: metric.label().to_string(),
                unit: metric.unit().to_string(),
                weight: rule.weight,
                target: rule.rule.target(),
            }
        })
        .collect();

    Ok(Json(targets))
}

async fn score_handler(
    State(state): State<ScoringState>,
    Json(request): Json<ScoreRequest>,
) -> Json<ScoreResponse> {
    let profile = request.profile.unwrap_or(state.default_profile);
    let result = state.engine.score(&request.readings, profile);
    Json(result.into())
}

async fn batch_handler(
    State(state): State<ScoringState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<Vec<BatchEntry>>, AppError> {
    let scans = ScanImporter::from_reader(Cursor::new(request.csv.into_bytes()))?;
    let profile = request.profile.unwrap_or(state.default_profile);

    let entries = state
        .engine
        .score_batch(&scans, profile)
        .into_iter()
        .map(|scan| BatchEntry {
            label: scan.label,
            score: scan.result.into(),
        })
        .collect();

    Ok(Json(entries))
}
