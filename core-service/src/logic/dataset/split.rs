//! Stratified train/test split
//!
//! Each class is shuffled and split on its own so both halves keep the
//! generator's ad/content ratio.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::record::LabeledSample;

/// Default share of samples held out for evaluation
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: Vec<LabeledSample>,
    pub test: Vec<LabeledSample>,
}

pub fn stratified_split(samples: Vec<LabeledSample>, test_fraction: f64, seed: u64) -> TrainTestSplit {
    let fraction = test_fraction.clamp(0.0, 1.0);
    let mut rng = StdRng::seed_from_u64(seed);

    let (mut ads, mut content): (Vec<_>, Vec<_>) = samples.into_iter().partition(|s| s.is_ad);
    ads.shuffle(&mut rng);
    content.shuffle(&mut rng);

    let mut train = Vec::new();
    let mut test = Vec::new();

    for mut class in [ads, content] {
        let n_test = (class.len() as f64 * fraction).round() as usize;
        test.extend(class.drain(..n_test));
        train.extend(class);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    TrainTestSplit { train, test }
}
