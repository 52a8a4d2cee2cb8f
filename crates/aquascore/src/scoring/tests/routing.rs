use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::scoring::{scoring_router, Profile, ScoringEngine};

fn router(default_profile: Profile) -> axum::Router {
    scoring_router(Arc::new(ScoringEngine::default()), default_profile)
}

async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("router dispatch");
    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let payload = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, payload)
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

#[tokio::test]
async fn score_endpoint_uses_default_profile() {
    let request = post_json(
        "/api/v1/water/score",
        json!({ "readings": { "sodium": 100 } }),
    );

    let (status, payload) = send(router(Profile::Infant), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["profile"], json!("infant"));
    assert_eq!(payload["metrics"].as_array().map(Vec::len), Some(19));
    assert_eq!(payload["metrics"][2]["metric"], json!("sodium"));
    assert_eq!(payload["metrics"][2]["weight"], json!(2.0));
    assert!(payload["rating"].is_string());
}

#[tokio::test]
async fn score_endpoint_accepts_leaky_ocr_values() {
    let request = post_json(
        "/api/v1/water/score",
        json!({
            "profile": "standard",
            "readings": { "ph": "7,5", "calcium": "unreadable", "na": 12 }
        }),
    );

    let (status, payload) = send(router(Profile::Standard), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["valid_data_points"], json!(2));
    assert_eq!(payload["metrics"][4]["explanation"], json!("Calcium unknown"));
}

#[tokio::test]
async fn batch_endpoint_reports_bad_rows() {
    let request = post_json(
        "/api/v1/water/score/batch",
        json!({ "csv": "label,profile,ph\nOne,astronaut,7\n" }),
    );

    let (status, payload) = send(router(Profile::Standard), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["error"]
        .as_str()
        .is_some_and(|error| error.contains("row 2")));
}

#[tokio::test]
async fn batch_endpoint_scores_each_row() {
    let request = post_json(
        "/api/v1/water/score/batch",
        json!({ "profile": "coffee", "csv": "label,ph,sodium\nA,7.0,4\nB,,\n" }),
    );

    let (status, payload) = send(router(Profile::Standard), request).await;

    assert_eq!(status, StatusCode::OK);
    let entries = payload.as_array().expect("array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["label"], json!("A"));
    assert_eq!(entries[0]["profile"], json!("coffee"));
    assert_eq!(entries[1]["total_score"], json!(50.0));
}

#[tokio::test]
async fn targets_endpoint_rejects_unknown_profiles() {
    let request = Request::builder()
        .uri("/api/v1/water/profiles/astronaut/targets")
        .body(Body::empty())
        .expect("request");

    let (status, _) = send(router(Profile::Standard), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn targets_endpoint_lists_every_metric() {
    let request = Request::builder()
        .uri("/api/v1/water/profiles/sport/targets")
        .body(Body::empty())
        .expect("request");

    let (status, payload) = send(router(Profile::Standard), request).await;

    assert_eq!(status, StatusCode::OK);
    let targets = payload.as_array().expect("array");
    assert_eq!(targets.len(), 19);
    let calcium = targets
        .iter()
        .find(|target| target["metric"] == json!("calcium"))
        .expect("calcium target");
    assert_eq!(calcium["target"], json!({ "min": 100.0, "max": 300.0 }));
}

#[tokio::test]
async fn profiles_endpoint_lists_all_profiles() {
    let request = Request::builder()
        .uri("/api/v1/water/profiles")
        .body(Body::empty())
        .expect("request");

    let (status, payload) = send(router(Profile::Standard), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload.as_array().map(Vec::len), Some(9));
    assert_eq!(payload[4]["profile"], json!("blood_pressure"));
}
