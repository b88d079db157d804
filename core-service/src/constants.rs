//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Limits exposed by `/health` are read from here.

use std::path::PathBuf;

/// Maximum number of candidates scored per request.
/// Extra candidates are dropped from the tail.
pub const MAX_CANDIDATES: usize = 500;

/// Minimum confidence (percent) for a candidate to be reported as an ad
pub const CONFIDENCE_THRESHOLD: u8 = 80;

/// Maximum request payload size in megabytes
pub const MAX_REQUEST_SIZE_MB: usize = 10;

/// Default file name of the persisted classifier artifact
pub const DEFAULT_MODEL_FILE: &str = "ad_detector_model.json";

/// Default number of synthetic samples generated by the trainer
pub const DEFAULT_TRAINING_SAMPLES: usize = 5000;

/// Default seed for the trainer (reproducible artifacts)
pub const DEFAULT_TRAINING_SEED: u64 = 42;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "AdLens";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Directory holding the model artifact when no override is set
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("adlens")
}

/// Get model artifact path from environment or use default
pub fn get_model_path() -> PathBuf {
    std::env::var("ADLENS_MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| get_data_dir().join(DEFAULT_MODEL_FILE))
}

/// Get batch cap from environment or use default
pub fn get_max_candidates() -> usize {
    std::env::var("ADLENS_MAX_CANDIDATES")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(MAX_CANDIDATES)
}

/// Get confidence threshold from environment or use default
pub fn get_confidence_threshold() -> u8 {
    std::env::var("ADLENS_CONFIDENCE_THRESHOLD")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&t: &u8| t <= 100)
        .unwrap_or(CONFIDENCE_THRESHOLD)
}

/// Get payload cap (MB) from environment or use default
pub fn get_max_request_size_mb() -> usize {
    std::env::var("ADLENS_MAX_REQUEST_SIZE_MB")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(MAX_REQUEST_SIZE_MB)
}
