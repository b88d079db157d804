//! Model Module - Classification oracle
//!
//! The pipeline only sees `AdOracle`. Concrete models, artifact loading and
//! the hot-swappable registry live behind it.

pub mod inference;
pub mod threshold;
pub mod logistic;
pub mod artifact;
pub mod registry;
pub mod metrics;
#[cfg(feature = "onnx")]
pub mod onnx;

// Re-export common types
pub use inference::{AdOracle, BatchScore, OracleError, LABEL_CUTOFF, PROBABILITY_TOLERANCE};
pub use threshold::{ConfidencePolicy, Decision};
pub use logistic::{LogisticModel, TrainingError, TrainingParams};
pub use artifact::{load_artifact, ArtifactError, ArtifactFormat, LoadedOracle, ModelInfo};
pub use registry::OracleRegistry;
pub use metrics::{cross_validate, evaluate, ClassMetrics, ConfusionMatrix, CrossValidation, EvaluationReport};
#[cfg(feature = "onnx")]
pub use onnx::OnnxOracle;
