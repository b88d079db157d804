//! Router tests: real handlers and layers, driven with `oneshot`

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use adlens_core::logic::dataset::generate_training_data;
use adlens_core::logic::model::TrainingParams;
use adlens_core::{LogisticModel, OracleRegistry, PipelineConfig};

use crate::config::Config;
use crate::{create_router, AppState};

fn test_config(model_path: &Path) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        model_path: model_path.to_path_buf(),
        pipeline: PipelineConfig::default(),
        environment: "test".to_string(),
    }
}

fn app_with(config: Config) -> Router {
    let registry = Arc::new(OracleRegistry::load_or_empty(&config.model_path));
    create_router(AppState::new(config, registry))
}

fn write_model(path: &Path) {
    LogisticModel::fit(&generate_training_data(3000, 42), &TrainingParams::default())
        .unwrap()
        .save(path)
        .unwrap();
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn iframe_ad() -> Value {
    json!({
        "keyWordHit": true,
        "keyWordSource": "id",
        "isIframe": true,
        "tag": "IFRAME",
        "id": "google-ad-1",
        "classList": "advertisement",
        "width": 728,
        "height": 90,
        "area": 65520
    })
}

fn assert_error_body(body: &Value, status: StatusCode) {
    assert_eq!(body["status"], status.as_u16());
    assert!(body["error"].is_string());
    assert_eq!(body["request_id"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn health_reports_limits_without_model() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with(test_config(&dir.path().join("missing.json")));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-private-network").unwrap(),
        "true"
    );

    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], false);
    assert!(body["model"].is_null());
    assert_eq!(body["MAX_CANDIDATES"], 500);
    assert_eq!(body["CONFIDENCE_THRESHOLD"], 80);
    assert_eq!(body["MAX_REQUEST_SIZE_MB"], 10);
}

#[tokio::test]
async fn predict_without_model_is_503() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with(test_config(&dir.path().join("missing.json")));

    let response = app
        .oneshot(post_json("/predict", &json!({"adCandidates": [iframe_ad()]})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_error_body(&read_json(response).await, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn empty_batch_succeeds_without_model() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with(test_config(&dir.path().join("missing.json")));

    let response = app
        .oneshot(post_json("/predict", &json!({"adCandidates": []})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["predictions"], json!([]));
    assert_eq!(body["total_scanned"], 0);
    assert_eq!(body["ads_detected"], 0);
}

#[tokio::test]
async fn malformed_requests_are_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with(test_config(&dir.path().join("missing.json")));

    let missing = app
        .clone()
        .oneshot(post_json("/predict", &json!({"candidates": []})))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    let body = read_json(missing).await;
    assert_error_body(&body, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("adCandidates"));

    let invalid = app
        .oneshot(post_json(
            "/predict",
            &json!({"adCandidates": [{"tag": "DIV", "height": 90, "area": 0}]}),
        ))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    let body = read_json(invalid).await;
    assert_eq!(body["error"], "candidate[0]: missing required field: width");
}

#[tokio::test]
async fn oversized_payload_is_413() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir.path().join("missing.json"));
    config.pipeline.max_request_size_mb = 1;
    let app = app_with(config);

    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(vec![b' '; 1024 * 1024 + 16]))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_error_body(&read_json(response).await, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn predict_with_trained_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    write_model(&path);
    let app = app_with(test_config(&path));

    let response = app
        .oneshot(post_json("/predict", &json!({"adCandidates": [iframe_ad()]})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let prediction = &body["predictions"][0];
    assert_eq!(prediction["index"], 0);
    assert_eq!(prediction["isAd"], true);
    assert_eq!(prediction["selector"], "#google-ad-1");
    assert!(prediction["confidence"].as_u64().unwrap() >= 80);
    assert_eq!(body["total_scanned"], 1);
    assert_eq!(body["ads_detected"], 1);
    assert_eq!(body["request_id"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn reload_picks_up_new_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let app = app_with(test_config(&path));

    let failed = read_json(app.clone().oneshot(post_empty("/reload-model")).await.unwrap()).await;
    assert_eq!(failed["success"], false);
    assert!(failed["request_id"].is_string());

    write_model(&path);
    let reloaded = read_json(app.clone().oneshot(post_empty("/reload-model")).await.unwrap()).await;
    assert_eq!(reloaded["success"], true);
    assert_eq!(reloaded["model"]["kind"], "logistic");

    let health = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let health = read_json(health).await;
    assert_eq!(health["model_loaded"], true);
    assert_eq!(health["model"]["checksum"], reloaded["model"]["checksum"]);
}

#[tokio::test]
async fn cors_preflight_carries_private_network_header() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with(test_config(&dir.path().join("missing.json")));

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/predict")
        .header("origin", "chrome-extension://abcdef")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(
        response.headers().get("access-control-allow-private-network").unwrap(),
        "true"
    );
}
