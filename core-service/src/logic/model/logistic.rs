//! Logistic Baseline Model
//!
//! Built-in oracle trained by `adlens-train` on synthetic data and persisted
//! as JSON. Features are standardized with the training mean/scale before
//! the linear decision function.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::dataset::LabeledSample;
use crate::logic::features::layout::{layout_hash, validate_layout, FEATURE_LAYOUT};
use crate::logic::features::{FeatureVector, FEATURE_COUNT, FEATURE_VERSION};
use super::artifact::ArtifactError;
use super::inference::{AdOracle, OracleError};

/// Bump when the JSON shape changes
pub const LOGISTIC_FORMAT_VERSION: u32 = 1;

/// Gradient descent settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingParams {
    pub epochs: usize,
    pub learning_rate: f64,
    /// L2 penalty on the weights (not the bias)
    pub l2: f64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: 300,
            learning_rate: 0.5,
            l2: 1e-4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrainingError {
    #[error("no training samples")]
    Empty,

    #[error("training samples contain a single class")]
    SingleClass,

    #[error("training diverged (non-finite weights)")]
    Diverged,
}

/// Standardized logistic regression over the feature layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub format_version: u32,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub means: Vec<f32>,
    pub scales: Vec<f32>,
    pub weights: Vec<f32>,
    pub bias: f32,
    pub training_samples: usize,
    pub trained_at: DateTime<Utc>,
}

impl LogisticModel {
    /// Fit on labeled samples with full-batch gradient descent
    pub fn fit(samples: &[LabeledSample], params: &TrainingParams) -> Result<Self, TrainingError> {
        if samples.is_empty() {
            return Err(TrainingError::Empty);
        }
        let ads = samples.iter().filter(|s| s.is_ad).count();
        if ads == 0 || ads == samples.len() {
            return Err(TrainingError::SingleClass);
        }

        let n = samples.len() as f64;
        let (means, scales) = standardization(samples);

        let rows: Vec<[f64; FEATURE_COUNT]> = samples
            .iter()
            .map(|s| standardize(s.features.as_array(), &means, &scales))
            .collect();
        let targets: Vec<f64> = samples.iter().map(|s| s.target() as f64).collect();

        let mut weights = [0.0f64; FEATURE_COUNT];
        let mut bias = 0.0f64;

        for _ in 0..params.epochs {
            let mut grad_w = [0.0f64; FEATURE_COUNT];
            let mut grad_b = 0.0f64;

            for (x, y) in rows.iter().zip(&targets) {
                let error = sigmoid(dot(x, &weights) + bias) - y;
                for (g, xi) in grad_w.iter_mut().zip(x) {
                    *g += error * xi;
                }
                grad_b += error;
            }

            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= params.learning_rate * (g / n + params.l2 * *w);
            }
            bias -= params.learning_rate * grad_b / n;
        }

        if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
            return Err(TrainingError::Diverged);
        }

        Ok(Self {
            format_version: LOGISTIC_FORMAT_VERSION,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            means: means.iter().map(|v| *v as f32).collect(),
            scales: scales.iter().map(|v| *v as f32).collect(),
            weights: weights.iter().map(|v| *v as f32).collect(),
            bias: bias as f32,
            training_samples: samples.len(),
            trained_at: Utc::now(),
        })
    }

    /// Probability of the ad class for one vector
    pub fn probability(&self, vector: &FeatureVector) -> f32 {
        let mut z = self.bias as f64;
        for i in 0..FEATURE_COUNT {
            let x = (vector.values[i] as f64 - self.means[i] as f64) / self.scales[i] as f64;
            z += x * self.weights[i] as f64;
        }
        sigmoid(z) as f32
    }

    /// Feature names paired with their weights, strongest first
    pub fn ranked_weights(&self) -> Vec<(&'static str, f32)> {
        let mut ranked: Vec<_> = FEATURE_LAYOUT
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        ranked
    }

    /// Write the artifact as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Parse and validate an artifact
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let model: LogisticModel = serde_json::from_slice(bytes)?;

        if model.format_version != LOGISTIC_FORMAT_VERSION {
            return Err(ArtifactError::InvalidModel(format!(
                "unsupported format version {}",
                model.format_version
            )));
        }

        validate_layout(model.feature_version, model.layout_hash)?;

        for (name, values) in [("means", &model.means), ("scales", &model.scales), ("weights", &model.weights)] {
            if values.len() != FEATURE_COUNT {
                return Err(ArtifactError::InvalidModel(format!(
                    "{} has {} entries, expected {}",
                    name,
                    values.len(),
                    FEATURE_COUNT
                )));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(ArtifactError::InvalidModel(format!("{} contains non-finite values", name)));
            }
        }
        if model.scales.iter().any(|s| *s <= 0.0) {
            return Err(ArtifactError::InvalidModel("scales must be positive".to_string()));
        }
        if !model.bias.is_finite() {
            return Err(ArtifactError::InvalidModel("bias is not finite".to_string()));
        }

        Ok(model)
    }
}

impl AdOracle for LogisticModel {
    fn kind(&self) -> &'static str {
        "logistic"
    }

    fn predict_proba(&self, batch: &[FeatureVector]) -> Result<Vec<f32>, OracleError> {
        Ok(batch.iter().map(|v| self.probability(v)).collect())
    }
}

fn standardization(samples: &[LabeledSample]) -> ([f64; FEATURE_COUNT], [f64; FEATURE_COUNT]) {
    let n = samples.len() as f64;
    let mut means = [0.0f64; FEATURE_COUNT];
    let mut scales = [0.0f64; FEATURE_COUNT];

    for sample in samples {
        for (m, v) in means.iter_mut().zip(sample.features.as_array()) {
            *m += *v as f64 / n;
        }
    }
    for sample in samples {
        for i in 0..FEATURE_COUNT {
            let d = sample.features.values[i] as f64 - means[i];
            scales[i] += d * d / n;
        }
    }
    for s in scales.iter_mut() {
        // Constant features keep a unit scale
        *s = if *s > 1e-12 { s.sqrt() } else { 1.0 };
    }

    (means, scales)
}

fn standardize(values: &[f32; FEATURE_COUNT], means: &[f64; FEATURE_COUNT], scales: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
    let mut out = [0.0f64; FEATURE_COUNT];
    for i in 0..FEATURE_COUNT {
        out[i] = (values[i] as f64 - means[i]) / scales[i];
    }
    out
}

fn dot(x: &[f64; FEATURE_COUNT], w: &[f64; FEATURE_COUNT]) -> f64 {
    x.iter().zip(w).map(|(a, b)| a * b).sum()
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
