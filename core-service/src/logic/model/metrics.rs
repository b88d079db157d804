//! Evaluation Metrics
//!
//! Held-out evaluation and k-fold cross-validation for the trainer.

use serde::{Deserialize, Serialize};

use crate::logic::dataset::LabeledSample;
use crate::logic::features::FeatureVector;
use super::inference::{AdOracle, OracleError};
use super::logistic::{LogisticModel, TrainingError, TrainingParams};

/// Binary confusion matrix, "ad" is the positive class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_positives: usize,
}

impl ConfusionMatrix {
    pub fn from_labels(actual: &[bool], predicted: &[bool]) -> Self {
        let mut cm = Self::default();
        for (a, p) in actual.iter().zip(predicted) {
            match (a, p) {
                (false, false) => cm.true_negatives += 1,
                (false, true) => cm.false_positives += 1,
                (true, false) => cm.false_negatives += 1,
                (true, true) => cm.true_positives += 1,
            }
        }
        cm
    }

    pub fn total(&self) -> usize {
        self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_negatives + self.true_positives, self.total())
    }

    /// Metrics for the ad class
    pub fn ad_class(&self) -> ClassMetrics {
        ClassMetrics::new(self.true_positives, self.false_positives, self.false_negatives)
    }

    /// Metrics for the non-ad class
    pub fn content_class(&self) -> ClassMetrics {
        ClassMetrics::new(self.true_negatives, self.false_negatives, self.false_positives)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

impl ClassMetrics {
    fn new(hits: usize, false_alarms: usize, misses: usize) -> Self {
        let precision = ratio(hits, hits + false_alarms);
        let recall = ratio(hits, hits + misses);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            precision,
            recall,
            f1,
            support: hits + misses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    pub ad: ClassMetrics,
    pub content: ClassMetrics,
}

/// Score `samples` with the oracle's own labels
pub fn evaluate(oracle: &dyn AdOracle, samples: &[LabeledSample]) -> Result<EvaluationReport, OracleError> {
    let batch: Vec<FeatureVector> = samples.iter().map(|s| s.features.clone()).collect();
    let score = oracle.score(&batch)?;
    score.validate(batch.len())?;

    let actual: Vec<bool> = samples.iter().map(|s| s.is_ad).collect();
    let confusion = ConfusionMatrix::from_labels(&actual, &score.labels);

    Ok(EvaluationReport {
        confusion,
        accuracy: confusion.accuracy(),
        ad: confusion.ad_class(),
        content: confusion.content_class(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidation {
    pub fold_accuracies: Vec<f64>,
    pub mean: f64,
    pub std: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum CrossValidationError {
    #[error("need at least 2 folds and one sample per fold (folds={folds}, samples={samples})")]
    TooFewSamples { folds: usize, samples: usize },

    #[error(transparent)]
    Training(#[from] TrainingError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// k-fold accuracy of the logistic model. Folds are contiguous slices, so
/// `samples` should already be shuffled.
pub fn cross_validate(
    samples: &[LabeledSample],
    folds: usize,
    params: &TrainingParams,
) -> Result<CrossValidation, CrossValidationError> {
    if folds < 2 || samples.len() < folds {
        return Err(CrossValidationError::TooFewSamples {
            folds,
            samples: samples.len(),
        });
    }

    let fold_size = samples.len() / folds;
    let mut fold_accuracies = Vec::with_capacity(folds);

    for k in 0..folds {
        let start = k * fold_size;
        let end = if k + 1 == folds { samples.len() } else { start + fold_size };

        let held_out = &samples[start..end];
        let train: Vec<LabeledSample> = samples[..start]
            .iter()
            .chain(&samples[end..])
            .cloned()
            .collect();

        let model = LogisticModel::fit(&train, params)?;
        let report = evaluate(&model, held_out)?;
        log::debug!("Fold {}/{}: accuracy {:.3}", k + 1, folds, report.accuracy);
        fold_accuracies.push(report.accuracy);
    }

    let n = fold_accuracies.len() as f64;
    let mean = fold_accuracies.iter().sum::<f64>() / n;
    let std = (fold_accuracies.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / n).sqrt();

    Ok(CrossValidation {
        fold_accuracies,
        mean,
        std,
    })
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::generate_training_data;

    #[test]
    fn test_confusion_matrix() {
        let actual = [true, true, false, false, true];
        let predicted = [true, false, false, true, true];
        let cm = ConfusionMatrix::from_labels(&actual, &predicted);

        assert_eq!(cm.true_positives, 2);
        assert_eq!(cm.false_negatives, 1);
        assert_eq!(cm.true_negatives, 1);
        assert_eq!(cm.false_positives, 1);
        assert_eq!(cm.total(), 5);
        assert!((cm.accuracy() - 0.6).abs() < 1e-9);

        let ad = cm.ad_class();
        assert!((ad.precision - 2.0 / 3.0).abs() < 1e-9);
        assert!((ad.recall - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(ad.support, 3);
        assert_eq!(cm.content_class().support, 2);
    }

    #[test]
    fn test_empty_class_metrics() {
        let cm = ConfusionMatrix::from_labels(&[false, false], &[false, false]);
        let ad = cm.ad_class();
        assert_eq!(ad.precision, 0.0);
        assert_eq!(ad.f1, 0.0);
        assert_eq!(cm.accuracy(), 1.0);
    }

    #[test]
    fn test_evaluate_trained_model() {
        let samples = generate_training_data(1500, 5);
        let model = LogisticModel::fit(&samples[..1200], &TrainingParams::default()).unwrap();
        let report = evaluate(&model, &samples[1200..]).unwrap();

        assert_eq!(report.confusion.total(), 300);
        assert!(report.accuracy > 0.85, "accuracy {}", report.accuracy);
        assert!(report.ad.f1 > 0.8);
    }

    #[test]
    fn test_cross_validate() {
        let samples = generate_training_data(1000, 9);
        let params = TrainingParams { epochs: 150, ..Default::default() };
        let cv = cross_validate(&samples, 5, &params).unwrap();

        assert_eq!(cv.fold_accuracies.len(), 5);
        assert!(cv.mean > 0.8, "mean {}", cv.mean);
        assert!(cv.std >= 0.0);
    }

    #[test]
    fn test_cross_validate_rejects_bad_folds() {
        let samples = generate_training_data(10, 1);
        let params = TrainingParams::default();
        assert!(matches!(
            cross_validate(&samples, 1, &params),
            Err(CrossValidationError::TooFewSamples { .. })
        ));
        assert!(cross_validate(&samples, 20, &params).is_err());
    }
}
