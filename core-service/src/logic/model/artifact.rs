//! Model Artifacts
//!
//! One persisted classifier per deployment. The format is picked from the
//! file extension:
//! - `.json` → built-in `LogisticModel` written by `adlens-train`
//! - `.onnx` → externally trained model (feature `onnx`)

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::features::layout::LayoutMismatchError;
use super::inference::AdOracle;
use super::logistic::LogisticModel;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("model artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed artifact: {0}")]
    Format(#[from] serde_json::Error),

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error("unsupported artifact format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid model: {0}")]
    InvalidModel(String),
}

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    Json,
    Onnx,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> Result<Self, ArtifactError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(ArtifactFormat::Json),
            "onnx" => Ok(ArtifactFormat::Onnx),
            "" => Err(ArtifactError::UnsupportedFormat("<no extension>".to_string())),
            other => Err(ArtifactError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Metadata about the active artifact, reported by `/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub kind: String,
    pub format: ArtifactFormat,
    pub path: PathBuf,
    /// Hex SHA-256 of the artifact bytes
    pub checksum: String,
    pub size_bytes: u64,
    pub loaded_at: DateTime<Utc>,
}

/// A ready oracle plus where it came from
pub struct LoadedOracle {
    pub oracle: Arc<dyn AdOracle>,
    pub info: ModelInfo,
}

impl std::fmt::Debug for LoadedOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedOracle").field("info", &self.info).finish()
    }
}

/// Read, checksum and deserialize an artifact
pub fn load_artifact(path: &Path) -> Result<LoadedOracle, ArtifactError> {
    log::info!("Loading model artifact from: {}", path.display());

    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }

    let format = ArtifactFormat::from_path(path)?;
    let bytes = fs::read(path)?;
    let checksum = sha256_hex(&bytes);

    let oracle: Arc<dyn AdOracle> = match format {
        ArtifactFormat::Json => Arc::new(LogisticModel::from_slice(&bytes)?),
        ArtifactFormat::Onnx => load_onnx(&bytes)?,
    };

    let info = ModelInfo {
        kind: oracle.kind().to_string(),
        format,
        path: path.to_path_buf(),
        checksum,
        size_bytes: bytes.len() as u64,
        loaded_at: Utc::now(),
    };

    log::info!(
        "Model loaded: kind={} checksum={} ({} bytes)",
        info.kind,
        &info.checksum[..12],
        info.size_bytes
    );

    Ok(LoadedOracle { oracle, info })
}

#[cfg(feature = "onnx")]
fn load_onnx(bytes: &[u8]) -> Result<Arc<dyn AdOracle>, ArtifactError> {
    Ok(Arc::new(super::onnx::OnnxOracle::from_bytes(bytes)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(_bytes: &[u8]) -> Result<Arc<dyn AdOracle>, ArtifactError> {
    Err(ArtifactError::UnsupportedFormat(
        "onnx (built without the `onnx` feature)".to_string(),
    ))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
