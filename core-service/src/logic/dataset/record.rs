use serde::{Deserialize, Serialize};
use crate::logic::features::FeatureVector;

/// One labeled training example
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LabeledSample {
    pub features: FeatureVector,
    pub is_ad: bool,
}

impl LabeledSample {
    pub fn ad(features: FeatureVector) -> Self {
        Self { features, is_ad: true }
    }

    pub fn content(features: FeatureVector) -> Self {
        Self { features, is_ad: false }
    }

    /// 1.0 for ads, 0.0 otherwise
    pub fn target(&self) -> f32 {
        if self.is_ad { 1.0 } else { 0.0 }
    }
}
