//! Model management handlers

use axum::{extract::State, Json};
use serde::Serialize;

use adlens_core::{new_request_id, ModelInfo};

use crate::{AppError, AppResult, AppState};

#[derive(Serialize)]
pub struct ReloadResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<ModelInfo>,
    request_id: String,
}

/// Re-read the artifact and swap it in. A failed reload keeps the
/// current model and reports `success: false`.
pub async fn reload(State(state): State<AppState>) -> AppResult<Json<ReloadResponse>> {
    let request_id = new_request_id();

    let registry = state.registry.clone();
    let outcome = tokio::task::spawn_blocking(move || registry.reload())
        .await
        .map_err(|e| AppError::InternalError(format!("reload task failed: {}", e)).with_request_id(&request_id))?;

    let response = match outcome {
        Ok(info) => {
            tracing::info!("[{}] Model reloaded from {}", request_id, info.path.display());
            ReloadResponse {
                success: true,
                message: "Model reloaded".to_string(),
                model: Some(info),
                request_id,
            }
        }
        Err(e) => {
            tracing::warn!("[{}] Model reload failed: {}", request_id, e);
            let message = if state.registry.is_loaded() {
                format!("{} (previous model still active)", e)
            } else {
                e.to_string()
            };
            ReloadResponse {
                success: false,
                message,
                model: state.registry.info(),
                request_id,
            }
        }
    };

    Ok(Json(response))
}
