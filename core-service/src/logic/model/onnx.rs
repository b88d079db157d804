//! ONNX Runtime Oracle
//!
//! Runs externally trained classifiers (e.g. a scikit-learn forest exported
//! with `zipmap=False`). Input is a single `[N, FEATURE_COUNT]` f32 tensor.
//! The probability output is the one whose name contains "prob", falling
//! back to the last output; `[N, 2]` uses column 1, `[N]` / `[N, 1]` is
//! taken as-is.

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use super::artifact::ArtifactError;
use super::inference::{AdOracle, OracleError};

pub struct OnnxOracle {
    // `Session::run` needs exclusive access
    session: Mutex<Session>,
    probability_output: String,
}

impl OnnxOracle {
    pub fn from_bytes(model_bytes: &[u8]) -> Result<Self, ArtifactError> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| ArtifactError::InvalidModel(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ArtifactError::InvalidModel(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| ArtifactError::InvalidModel(format!("Load from memory error: {}", e)))?;

        let probability_output = session
            .outputs
            .iter()
            .find(|o| o.name.to_ascii_lowercase().contains("prob"))
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| ArtifactError::InvalidModel("No output defined".to_string()))?;

        log::debug!("ONNX probability output: {}", probability_output);

        Ok(Self {
            session: Mutex::new(session),
            probability_output,
        })
    }
}

impl AdOracle for OnnxOracle {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    fn predict_proba(&self, batch: &[FeatureVector]) -> Result<Vec<f32>, OracleError> {
        let n = batch.len();
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut input_data = Vec::with_capacity(n * FEATURE_COUNT);
        for vector in batch {
            input_data.extend_from_slice(vector.as_slice());
        }

        let input_array = Array2::<f32>::from_shape_vec((n, FEATURE_COUNT), input_data)
            .map_err(|e| OracleError::Inference(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| OracleError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| OracleError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.probability_output)
            .ok_or_else(|| OracleError::Inference(format!("Missing output {}", self.probability_output)))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| OracleError::Inference(format!("Extract error: {}", e)))?;

        let data = output_tensor.1;
        if data.len() < n || data.len() % n != 0 {
            return Err(OracleError::ShapeMismatch {
                expected: n,
                actual: data.len(),
            });
        }

        let columns = data.len() / n;
        let column = if columns >= 2 { 1 } else { 0 };

        Ok((0..n).map(|i| data[i * columns + column]).collect())
    }
}
