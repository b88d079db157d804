//! Features Module - Feature Extraction Engine
//!
//! Turns validated candidates into the fixed 10-feature vector the
//! classifier consumes. `sizing` holds the heuristics shared with the
//! synthetic training generator.

pub mod layout;
pub mod vector;
pub mod sizing;
pub mod extract;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, LayoutInfo, LayoutMismatchError};
pub use vector::{FeatureVector, FeatureVectorBuilder};
pub use extract::{extract_features, try_extract, Extraction, ExtractionFault};
