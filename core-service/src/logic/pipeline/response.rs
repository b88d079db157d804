use serde::{Deserialize, Serialize};

/// Decision for one candidate. `is_ad == (confidence >= threshold)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub index: usize,
    pub is_ad: bool,
    /// 0-100
    pub confidence: u8,
    pub selector: String,
}

/// Body of a successful `/predict`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predictions: Vec<PredictionResult>,
    pub total_scanned: usize,
    pub ads_detected: usize,
    pub request_id: String,
}

impl PredictResponse {
    pub fn empty(request_id: &str) -> Self {
        Self {
            predictions: Vec::new(),
            total_scanned: 0,
            ads_detected: 0,
            request_id: request_id.to_string(),
        }
    }

    pub fn from_results(predictions: Vec<PredictionResult>, request_id: &str) -> Self {
        let ads_detected = predictions.iter().filter(|p| p.is_ad).count();
        Self {
            total_scanned: predictions.len(),
            ads_detected,
            predictions,
            request_id: request_id.to_string(),
        }
    }
}
