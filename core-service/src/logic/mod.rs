//! Logic Module - Ad classification core
//!
//! - `candidate/` - untrusted element records, validation and defaulting
//! - `features/` - 10-feature extraction and layout versioning
//! - `selector` - CSS locator derivation
//! - `dataset/` - synthetic training data
//! - `model/` - classification oracle, artifacts, registry
//! - `pipeline/` - `/predict` orchestration

pub mod candidate;
pub mod features;
pub mod selector;
pub mod dataset;
pub mod model;
pub mod pipeline;
