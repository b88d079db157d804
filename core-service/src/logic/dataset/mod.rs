//! Dataset Module - Offline Training Data
//!
//! Synthetic labeled samples for training the ad classifier, plus the
//! stratified split used to evaluate it. Nothing here is persisted.

pub mod record;
pub mod synthetic;
pub mod split;


pub use record::LabeledSample;
pub use synthetic::{generate_training_data, SyntheticGenerator, ContentArchetype, AD_RATIO};
pub use split::{stratified_split, TrainTestSplit, DEFAULT_TEST_FRACTION};

/// (ads, non-ads) counts
pub fn class_balance(samples: &[LabeledSample]) -> (usize, usize) {
    let ads = samples.iter().filter(|s| s.is_ad).count();
    (ads, samples.len() - ads)
}
