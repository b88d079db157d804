//! Candidate Feature Extraction
//!
//! Maps a `CandidateRecord` to the 10-feature vector. The mapping is total:
//! when any sub-feature can't be computed the whole vector falls back to
//! zeros, and the caller learns why through `Extraction::Fallback`.

use crate::logic::candidate::CandidateRecord;
use super::sizing::{aspect_ratio, is_banner_sized, is_large_area, tag_score};
use super::vector::{FeatureVector, FeatureVectorBuilder};

/// Record fields whose values flow into the vector
const FEATURE_FIELDS: [&str; 2] = ["tag", "keyWordSource"];

/// Why a candidate couldn't be vectorized
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionFault {
    #[error("field {0} has an unexpected type")]
    SchemaFault(&'static str),

    #[error("feature {name} is not finite ({value})")]
    NonFinite { name: &'static str, value: f32 },
}

/// Outcome of extracting one candidate
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Extracted(FeatureVector),
    Fallback {
        vector: FeatureVector,
        reason: ExtractionFault,
    },
}

impl Extraction {
    pub fn vector(&self) -> &FeatureVector {
        match self {
            Extraction::Extracted(vector) => vector,
            Extraction::Fallback { vector, .. } => vector,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Extraction::Fallback { .. })
    }

    pub fn fault(&self) -> Option<&ExtractionFault> {
        match self {
            Extraction::Extracted(_) => None,
            Extraction::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Extract features, substituting the zero vector on failure
pub fn extract_features(record: &CandidateRecord) -> Extraction {
    match try_extract(record) {
        Ok(vector) => Extraction::Extracted(vector),
        Err(reason) => Extraction::Fallback {
            vector: FeatureVector::new(),
            reason,
        },
    }
}

/// Strict extraction: fails instead of falling back
pub fn try_extract(record: &CandidateRecord) -> Result<FeatureVector, ExtractionFault> {
    if let Some(field) = FEATURE_FIELDS.iter().copied().find(|f| record.has_fault(f)) {
        return Err(ExtractionFault::SchemaFault(field));
    }

    let (width, height, area) = (record.width, record.height, record.area);

    let vector = FeatureVectorBuilder::new()
        .keyword_hit(record.key_word_hit)
        .is_iframe(record.is_iframe)
        .dimensions(width, height, area)
        .keyword_source(record.key_word_source.rank())
        .aspect_ratio(aspect_ratio(width, height))
        .banner_sized(is_banner_sized(width, height))
        .large_area(is_large_area(area))
        .tag_score(tag_score(&record.tag))
        .build();

    if let Some((name, value)) = vector.first_non_finite() {
        return Err(ExtractionFault::NonFinite { name, value });
    }

    Ok(vector)
}
