//! Prediction handler

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};

use adlens_core::{new_request_id, PredictResponse};

use crate::{AppError, AppResult, AppState};

/// Classify a batch of ad candidates
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<PredictResponse>> {
    let request_id = new_request_id();

    let body = body.map_err(|rejection| {
        let error = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(format!(
                "request payload exceeds {} MB",
                state.pipeline.config().max_request_size_mb
            ))
        } else {
            AppError::ValidationError(rejection.body_text())
        };
        error.with_request_id(&request_id)
    })?;

    tracing::debug!("[{}] /predict received {} bytes", request_id, body.len());

    // Inference is CPU-bound; keep it off the reactor
    let pipeline = state.pipeline.clone();
    let registry = state.registry.clone();
    let task_id = request_id.clone();
    let result = tokio::task::spawn_blocking(move || pipeline.process(&body, &registry, &task_id))
        .await
        .map_err(|e| {
            AppError::InternalError(format!("prediction task failed: {}", e)).with_request_id(&request_id)
        })?;

    result
        .map(Json)
        .map_err(|e| AppError::from(e).with_request_id(&request_id))
}
