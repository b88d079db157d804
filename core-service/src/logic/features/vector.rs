//! Feature Vector - Core data structure for ML input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering between training and inference
//! - Version tracking
//! - Layout hash for compatibility checks

use serde::{Deserialize, Serialize};
use super::layout::{FEATURE_COUNT, FEATURE_VERSION, FEATURE_LAYOUT, layout_hash};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version.
    /// This is also the fallback used when extraction fails.
    pub fn new() -> Self {
        Self::from_values([0.0; FEATURE_COUNT])
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by index
    pub fn set(&mut self, index: usize, value: f32) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Set feature by name
    pub fn set_by_name(&mut self, name: &str, value: f32) -> bool {
        if let Some(index) = super::layout::feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    /// All zeros
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// First feature that is NaN or infinite
    pub fn first_non_finite(&self) -> Option<(&'static str, f32)> {
        FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .find(|(_, v)| !v.is_finite())
            .map(|(name, v)| (*name, *v))
    }

    /// Named values in layout order, for per-candidate trace logs
    pub fn to_log_entry(&self) -> serde_json::Value {
        let named: serde_json::Map<String, serde_json::Value> = FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
            .collect();

        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": format!("{:08x}", self.layout_hash),
            "features": named,
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f32; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f32; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self { vector: FeatureVector::new() }
    }

    pub fn keyword_hit(mut self, hit: bool) -> Self {
        self.vector.set_by_name("keyword_hit", flag(hit));
        self
    }

    pub fn is_iframe(mut self, iframe: bool) -> Self {
        self.vector.set_by_name("is_iframe", flag(iframe));
        self
    }

    /// Sets width, height and area together
    pub fn dimensions(mut self, width: f64, height: f64, area: f64) -> Self {
        self.vector.set_by_name("width", width as f32);
        self.vector.set_by_name("height", height as f32);
        self.vector.set_by_name("area", area as f32);
        self
    }

    pub fn keyword_source(mut self, rank: u8) -> Self {
        self.vector.set_by_name("keyword_source", rank as f32);
        self
    }

    pub fn aspect_ratio(mut self, ratio: f64) -> Self {
        self.vector.set_by_name("aspect_ratio", ratio as f32);
        self
    }

    pub fn banner_sized(mut self, banner: bool) -> Self {
        self.vector.set_by_name("is_banner_sized", flag(banner));
        self
    }

    pub fn large_area(mut self, large: bool) -> Self {
        self.vector.set_by_name("is_large_area", flag(large));
        self
    }

    pub fn tag_score(mut self, score: u8) -> Self {
        self.vector.set_by_name("tag_score", score as f32);
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

// ============================================================================
// TESTS
// ============================================================================
