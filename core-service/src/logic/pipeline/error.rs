use crate::logic::candidate::CandidateError;
use crate::logic::model::OracleError;

/// Request-level failures. Per-item extraction problems never show up here;
/// they are absorbed by the zero-vector fallback.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("request payload is {size} bytes, limit is {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("{0}")]
    MalformedRequest(String),

    #[error(transparent)]
    InvalidCandidate(#[from] CandidateError),

    #[error("model not loaded, train one with `adlens-train` and call /reload-model")]
    OracleUnavailable,

    #[error("prediction failed: {0}")]
    InferenceFailure(#[from] OracleError),
}

impl PipelineError {
    /// HTTP status the transport layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::PayloadTooLarge { .. } => 413,
            PipelineError::MalformedRequest(_) | PipelineError::InvalidCandidate(_) => 400,
            PipelineError::OracleUnavailable => 503,
            PipelineError::InferenceFailure(_) => 500,
        }
    }
}
