//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use adlens_core::ModelInfo;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
    model: Option<ModelInfo>,
    #[serde(rename = "MAX_CANDIDATES")]
    max_candidates: usize,
    #[serde(rename = "CONFIDENCE_THRESHOLD")]
    confidence_threshold: u8,
    #[serde(rename = "MAX_REQUEST_SIZE_MB")]
    max_request_size_mb: usize,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let limits = state.pipeline.config();
    let model = state.registry.info();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: model.is_some(),
        model,
        max_candidates: limits.max_candidates,
        confidence_threshold: limits.confidence_threshold,
        max_request_size_mb: limits.max_request_size_mb,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
