use serde::{Deserialize, Serialize};

use crate::constants;

/// Limits applied to every prediction request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Candidates beyond this are dropped from the tail
    pub max_candidates: usize,
    /// Minimum confidence (0-100) to report an ad
    pub confidence_threshold: u8,
    pub max_request_size_mb: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_candidates: constants::MAX_CANDIDATES,
            confidence_threshold: constants::CONFIDENCE_THRESHOLD,
            max_request_size_mb: constants::MAX_REQUEST_SIZE_MB,
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by `ADLENS_*` environment variables
    pub fn from_env() -> Self {
        Self {
            max_candidates: constants::get_max_candidates(),
            confidence_threshold: constants::get_confidence_threshold(),
            max_request_size_mb: constants::get_max_request_size_mb(),
        }
    }

    pub fn max_request_bytes(&self) -> usize {
        self.max_request_size_mb.saturating_mul(1024 * 1024)
    }
}
