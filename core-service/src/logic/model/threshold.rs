//! Confidence Threshold
//!
//! Turns an oracle probability into the integer confidence reported to the
//! extension and the final ad / not-ad decision.

use serde::{Deserialize, Serialize};

use crate::constants::CONFIDENCE_THRESHOLD;

/// Decision for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub confidence: u8,
    pub is_ad: bool,
}

/// Threshold Configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidencePolicy {
    /// Minimum confidence (0-100) to report an ad
    pub threshold: u8,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            threshold: CONFIDENCE_THRESHOLD,
        }
    }
}

impl ConfidencePolicy {
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold: threshold.min(100),
        }
    }

    /// `round(p * 100)`, with `p` clamped to [0, 1] and NaN treated as 0
    pub fn confidence(&self, probability: f32) -> u8 {
        if probability.is_nan() {
            return 0;
        }
        (probability.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    pub fn decide(&self, probability: f32) -> Decision {
        let confidence = self.confidence(probability);
        Decision {
            confidence,
            is_ad: confidence >= self.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(ConfidencePolicy::default().threshold, 80);
        assert_eq!(ConfidencePolicy::new(250).threshold, 100);
    }

    #[test]
    fn test_confidence_rounding() {
        let policy = ConfidencePolicy::default();
        assert_eq!(policy.confidence(0.0), 0);
        assert_eq!(policy.confidence(0.794), 79);
        assert_eq!(policy.confidence(0.796), 80);
        assert_eq!(policy.confidence(0.999), 100);
        assert_eq!(policy.confidence(1.0), 100);
    }

    #[test]
    fn test_confidence_bounds() {
        let policy = ConfidencePolicy::default();
        assert_eq!(policy.confidence(-3.0), 0);
        assert_eq!(policy.confidence(7.5), 100);
        assert_eq!(policy.confidence(f32::NAN), 0);
        assert_eq!(policy.confidence(f32::INFINITY), 100);
    }

    #[test]
    fn test_decision_matches_threshold() {
        let policy = ConfidencePolicy::default();
        for step in 0..=1000 {
            let decision = policy.decide(step as f32 / 1000.0);
            assert!(decision.confidence <= 100);
            assert_eq!(decision.is_ad, decision.confidence >= 80);
        }

        assert!(!policy.decide(0.79).is_ad);
        assert!(policy.decide(0.80).is_ad);
    }
}
