//! Error handling
//!
//! Every error body is `{"error", "status", "request_id"}`.

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use adlens_core::PipelineError;

pub type AppResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    PayloadTooLarge(String),
    ValidationError(String),

    // Model errors
    ModelUnavailable(String),
    InferenceError(String),

    // Generic errors
    InternalError(String),
}

impl AppError {
    /// Attach the correlation id returned to the client
    pub fn with_request_id(self, request_id: &str) -> ApiError {
        ApiError {
            error: self,
            request_id: request_id.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InferenceError(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let message = err.to_string();
        match err {
            PipelineError::PayloadTooLarge { .. } => AppError::PayloadTooLarge(message),
            PipelineError::MalformedRequest(_) | PipelineError::InvalidCandidate(_) => {
                AppError::ValidationError(message)
            }
            PipelineError::OracleUnavailable => AppError::ModelUnavailable(message),
            PipelineError::InferenceFailure(_) => AppError::InferenceError(message),
        }
    }
}

/// An `AppError` bound to the request it failed
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub request_id: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let error_message = match &self.error {
            AppError::PayloadTooLarge(msg)
            | AppError::ValidationError(msg)
            | AppError::ModelUnavailable(msg) => msg.as_str(),
            AppError::InferenceError(msg) => {
                tracing::error!("[{}] Inference error: {}", self.request_id, msg);
                msg.as_str()
            }
            AppError::InternalError(msg) => {
                tracing::error!("[{}] Internal error: {}", self.request_id, msg);
                "Internal server error"
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
            "request_id": self.request_id,
        }));

        (status, body).into_response()
    }
}
