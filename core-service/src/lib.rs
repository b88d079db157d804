//! AdLens Core
//!
//! Feature extraction, synthetic training data and the classification
//! pipeline behind the AdLens browser extension. Transport lives in
//! `adlens-server`; training in the `adlens-train` binary.

pub mod constants;
pub mod logic;

pub use logic::candidate::{CandidateError, CandidateRecord, KeywordSource};
pub use logic::features::{extract_features, Extraction, FeatureVector, FEATURE_COUNT};
pub use logic::model::{AdOracle, ArtifactError, LogisticModel, ModelInfo, OracleError, OracleRegistry};
pub use logic::pipeline::{new_request_id, PipelineConfig, PipelineError, PredictResponse, PredictionPipeline, PredictionResult};
pub use logic::selector::build_selector;
