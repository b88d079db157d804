//! Prediction Pipeline
//!
//! ```text
//! body ─► size check ─► parse ─► truncate ─► validate ─► extract ─► oracle ─► threshold ─► selector
//! ```
//!
//! Every stage before the oracle is pure. The oracle is called once per
//! request with the whole batch.

use std::time::Instant;

use serde_json::Value;

use crate::logic::candidate::validate_batch;
use crate::logic::features::{extract_features, Extraction, FeatureVector};
use crate::logic::features::sizing::banner_class;
use crate::logic::model::{AdOracle, ConfidencePolicy, OracleRegistry};
use crate::logic::selector::build_selector;
use super::config::PipelineConfig;
use super::error::PipelineError;
use super::request::{check_size, parse_candidates};
use super::response::{PredictResponse, PredictionResult};

#[derive(Debug, Clone)]
pub struct PredictionPipeline {
    config: PipelineConfig,
    policy: ConfidencePolicy,
}

impl Default for PredictionPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl PredictionPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            policy: ConfidencePolicy::new(config.confidence_threshold),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Full request path: raw body in, response or request-level error out
    pub fn process(
        &self,
        body: &[u8],
        registry: &OracleRegistry,
        request_id: &str,
    ) -> Result<PredictResponse, PipelineError> {
        check_size(body, self.config.max_request_bytes())?;
        let candidates = parse_candidates(body)?;

        let oracle = registry.get();
        self.predict(candidates, oracle.as_deref(), request_id)
    }

    /// Score an already-parsed candidate list
    pub fn predict(
        &self,
        mut candidates: Vec<Value>,
        oracle: Option<&dyn AdOracle>,
        request_id: &str,
    ) -> Result<PredictResponse, PipelineError> {
        let start = Instant::now();

        let received = candidates.len();
        if received > self.config.max_candidates {
            log::warn!(
                "[{}] Received {} candidates, truncating to {}",
                request_id,
                received,
                self.config.max_candidates
            );
            candidates.truncate(self.config.max_candidates);
        }

        let records = validate_batch(&candidates).map_err(|e| {
            log::warn!("[{}] Rejected request: {}", request_id, e);
            e
        })?;

        if records.is_empty() {
            log::debug!("[{}] Empty candidate list", request_id);
            return Ok(PredictResponse::empty(request_id));
        }

        let oracle = oracle.ok_or_else(|| {
            log::error!("[{}] Prediction requested with no model loaded", request_id);
            PipelineError::OracleUnavailable
        })?;

        log::debug!("[{}] Processing {} candidates", request_id, records.len());

        let extract_start = Instant::now();
        let vectors: Vec<FeatureVector> = records
            .iter()
            .enumerate()
            .map(|(index, record)| match extract_features(record) {
                Extraction::Extracted(vector) => {
                    log::trace!(
                        "[{}] candidate[{}] {} {}",
                        request_id,
                        index,
                        banner_class(record.width, record.height).unwrap_or("unsized"),
                        vector.to_log_entry()
                    );
                    vector
                }
                Extraction::Fallback { vector, reason } => {
                    log::warn!(
                        "[{}] candidate[{}]: feature extraction failed ({}), using zero vector",
                        request_id,
                        index,
                        reason
                    );
                    vector
                }
            })
            .collect();
        log::debug!(
            "[{}] Feature extraction took {:.2}ms",
            request_id,
            extract_start.elapsed().as_secs_f64() * 1000.0
        );

        let inference_start = Instant::now();
        let score = oracle
            .score(&vectors)
            .and_then(|score| score.validate(vectors.len()).map(|_| score))
            .map_err(|e| {
                log::error!("[{}] Prediction failed: {}", request_id, e);
                PipelineError::InferenceFailure(e)
            })?;
        log::debug!(
            "[{}] Model inference ({}) took {:.2}ms",
            request_id,
            oracle.kind(),
            inference_start.elapsed().as_secs_f64() * 1000.0
        );

        let predictions: Vec<PredictionResult> = records
            .iter()
            .zip(&score.probabilities)
            .enumerate()
            .map(|(index, (record, probability))| {
                let decision = self.policy.decide(*probability);
                PredictionResult {
                    index,
                    is_ad: decision.is_ad,
                    confidence: decision.confidence,
                    selector: build_selector(record),
                }
            })
            .collect();

        let response = PredictResponse::from_results(predictions, request_id);
        log::info!(
            "[{}] Detected {}/{} ads in {:.2}ms",
            request_id,
            response.ads_detected,
            response.total_scanned,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(response)
    }
}
