//! Inference Contract
//!
//! The classifier is an opaque oracle: give it a batch of feature vectors,
//! get back one probability-of-ad per vector. Implementations live in
//! `logistic.rs` (built-in baseline) and `onnx.rs` (externally trained).

use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureVector;

/// Probability at which the oracle's own label flips to "ad"
pub const LABEL_CUTOFF: f32 = 0.5;

/// Rounding slack allowed outside [0, 1] before a probability is rejected
pub const PROBABILITY_TOLERANCE: f32 = 1e-6;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OracleError {
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("oracle returned {actual} scores for {expected} candidates")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("oracle returned invalid probability {value} for candidate {index}")]
    InvalidProbability { index: usize, value: f32 },
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Oracle output for one batch (`predict` + `predict_proba` together)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchScore {
    /// Oracle's own hard decision per item
    pub labels: Vec<bool>,
    /// Probability of the "ad" class per item, in [0, 1]
    pub probabilities: Vec<f32>,
}

impl BatchScore {
    /// Labels derived from probabilities at `LABEL_CUTOFF`
    pub fn from_probabilities(probabilities: Vec<f32>) -> Self {
        let labels = probabilities.iter().map(|p| *p >= LABEL_CUTOFF).collect();
        Self { labels, probabilities }
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// One label and one finite probability in [0, 1] per candidate.
    /// Overshoot up to `PROBABILITY_TOLERANCE` is float noise and passes.
    pub fn validate(&self, expected: usize) -> Result<(), OracleError> {
        for actual in [self.probabilities.len(), self.labels.len()] {
            if actual != expected {
                return Err(OracleError::ShapeMismatch { expected, actual });
            }
        }

        if let Some((index, value)) = self
            .probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| {
                !p.is_finite() || **p < -PROBABILITY_TOLERANCE || **p > 1.0 + PROBABILITY_TOLERANCE
            })
        {
            return Err(OracleError::InvalidProbability { index, value: *value });
        }

        Ok(())
    }
}

// ============================================================================
// ORACLE TRAIT
// ============================================================================

/// Binary ad classifier. Shared read-only across request workers.
pub trait AdOracle: Send + Sync {
    /// Short model kind, e.g. "logistic" or "onnx"
    fn kind(&self) -> &'static str;

    /// Probability of the ad class for every vector in the batch
    fn predict_proba(&self, batch: &[FeatureVector]) -> Result<Vec<f32>, OracleError>;

    /// Hard labels for every vector in the batch
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<bool>, OracleError> {
        Ok(self.score(batch)?.labels)
    }

    /// Labels and probabilities in a single pass over the batch
    fn score(&self, batch: &[FeatureVector]) -> Result<BatchScore, OracleError> {
        Ok(BatchScore::from_probabilities(self.predict_proba(batch)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_cutoff() {
        let score = BatchScore::from_probabilities(vec![0.1, 0.5, 0.99]);
        assert_eq!(score.labels, vec![false, true, true]);
        assert!(score.validate(3).is_ok());
    }

    #[test]
    fn test_validate_shape() {
        let score = BatchScore::from_probabilities(vec![0.1, 0.2]);
        assert_eq!(
            score.validate(3),
            Err(OracleError::ShapeMismatch { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn test_validate_probability_range() {
        let score = BatchScore::from_probabilities(vec![0.1, f32::NAN]);
        assert!(matches!(
            score.validate(2),
            Err(OracleError::InvalidProbability { index: 1, .. })
        ));

        let score = BatchScore::from_probabilities(vec![1.5]);
        assert!(score.validate(1).is_err());

        let score = BatchScore::from_probabilities(vec![-0.01]);
        assert!(score.validate(1).is_err());
    }

    #[test]
    fn test_validate_tolerates_rounding_overshoot() {
        let score = BatchScore::from_probabilities(vec![1.000_000_1, 1.0, -1e-7, 0.0]);
        assert_eq!(score.validate(4), Ok(()));

        let score = BatchScore::from_probabilities(vec![1.0 + 1e-4]);
        assert!(matches!(
            score.validate(1),
            Err(OracleError::InvalidProbability { index: 0, .. })
        ));
    }
}
