//! Synthetic Training Data
//!
//! Generates labeled feature vectors that follow real-world ad / content
//! statistics without any browsing data. Output only lives for the duration
//! of a training run.
//!
//! Randomness comes from an explicitly seeded `StdRng`, so the same seed
//! always yields the same dataset.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::logic::features::sizing::{aspect_ratio, is_banner_sized, is_large_area};
use crate::logic::features::{FeatureVector, FeatureVectorBuilder};
use super::record::LabeledSample;

/// Share of generated samples labeled as ads
pub const AD_RATIO: f64 = 0.4;

// Ad generation probabilities
const AD_KEYWORD_RATE: f64 = 0.85;
const AD_IFRAME_RATE: f64 = 0.4;
const AD_STANDARD_SIZE_RATE: f64 = 0.7;
const AD_DIV_RATE: f64 = 0.7;

// Content generation probabilities
const CONTENT_KEYWORD_RATE: f64 = 0.15; // "header", "adapter", "shadow"...
const CONTENT_IFRAME_RATE: f64 = 0.05; // video and social embeds

const MIN_WIDTH: i64 = 50;
const MIN_HEIGHT: i64 = 20;

/// Canonical ad creative sizes (width, height)
pub const AD_SIZES: [(&str, i64, i64); 8] = [
    ("leaderboard", 728, 90),
    ("medium_rectangle", 300, 250),
    ("large_rectangle", 336, 280),
    ("half_page", 300, 600),
    ("wide_skyscraper", 160, 600),
    ("mobile_banner", 320, 50),
    ("large_mobile_banner", 320, 100),
    ("billboard", 970, 250),
];

/// Keyword source rank weights for ads: id, id, class, text
const AD_SOURCE_WEIGHTS: [(u8, u32); 4] = [(3, 3), (3, 3), (2, 2), (1, 1)];

/// Keyword source rank weights for content: none, text, text, class
const CONTENT_SOURCE_WEIGHTS: [(u8, u32); 4] = [(0, 1), (1, 2), (1, 2), (2, 1)];

/// Non-div, non-iframe ad tags: img, section, other
const AD_OTHER_TAGS: [u8; 3] = [1, 1, 0];

/// Tag score weights for content
const CONTENT_TAG_WEIGHTS: [(u8, u32); 4] = [(0, 4), (1, 3), (2, 2), (3, 1)];

/// Page regions regular content is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentArchetype {
    Header,
    Article,
    Sidebar,
    Footer,
    Image,
    Video,
    Nav,
}

impl ContentArchetype {
    pub const ALL: [ContentArchetype; 7] = [
        ContentArchetype::Header,
        ContentArchetype::Article,
        ContentArchetype::Sidebar,
        ContentArchetype::Footer,
        ContentArchetype::Image,
        ContentArchetype::Video,
        ContentArchetype::Nav,
    ];

    /// Inclusive (width, height) ranges
    pub fn size_range(self) -> ((i64, i64), (i64, i64)) {
        match self {
            ContentArchetype::Header => ((800, 1920), (60, 150)),
            ContentArchetype::Article => ((600, 900), (400, 2000)),
            ContentArchetype::Sidebar => ((200, 350), (300, 1200)),
            ContentArchetype::Footer => ((800, 1920), (100, 300)),
            ContentArchetype::Image => ((100, 800), (100, 600)),
            ContentArchetype::Video => ((400, 1280), (225, 720)),
            ContentArchetype::Nav => ((600, 1920), (40, 100)),
        }
    }
}

/// Seeded generator for labeled ad / non-ad samples
pub struct SyntheticGenerator {
    rng: StdRng,
}

impl SyntheticGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate `n` shuffled samples, `floor(n * AD_RATIO)` of them ads
    pub fn generate(&mut self, n: usize) -> Vec<LabeledSample> {
        let n_ads = (n as f64 * AD_RATIO) as usize;

        let mut samples = Vec::with_capacity(n);
        for _ in 0..n_ads {
            let features = self.ad_features();
            samples.push(LabeledSample::ad(features));
        }
        for _ in n_ads..n {
            let features = self.content_features();
            samples.push(LabeledSample::content(features));
        }

        // Label order must carry no positional signal
        samples.shuffle(&mut self.rng);

        log::debug!("Generated {} synthetic samples ({} ads)", n, n_ads);
        samples
    }

    fn ad_features(&mut self) -> FeatureVector {
        let has_keyword = self.rng.gen_bool(AD_KEYWORD_RATE);
        let is_iframe = self.rng.gen_bool(AD_IFRAME_RATE);

        let (width, height) = if self.rng.gen_bool(AD_STANDARD_SIZE_RATE) {
            let (_, w, h) = AD_SIZES[self.rng.gen_range(0..AD_SIZES.len())];
            (w + self.rng.gen_range(-20..=20), h + self.rng.gen_range(-10..=10))
        } else {
            (self.rng.gen_range(200..=1000), self.rng.gen_range(50..=400))
        };
        let width = width.max(MIN_WIDTH);
        let height = height.max(MIN_HEIGHT);

        let source_rank = if has_keyword {
            self.weighted(&AD_SOURCE_WEIGHTS)
        } else {
            0
        };

        let tag_score = if is_iframe {
            3
        } else if self.rng.gen_bool(AD_DIV_RATE) {
            2
        } else {
            AD_OTHER_TAGS.choose(&mut self.rng).copied().unwrap_or(0)
        };

        assemble(has_keyword, is_iframe, width, height, source_rank, tag_score)
    }

    fn content_features(&mut self) -> FeatureVector {
        let has_keyword = self.rng.gen_bool(CONTENT_KEYWORD_RATE);
        let is_iframe = self.rng.gen_bool(CONTENT_IFRAME_RATE);

        let archetype = ContentArchetype::ALL[self.rng.gen_range(0..ContentArchetype::ALL.len())];
        let ((w_min, w_max), (h_min, h_max)) = archetype.size_range();
        let width = self.rng.gen_range(w_min..=w_max);
        let height = self.rng.gen_range(h_min..=h_max);

        let source_rank = if has_keyword {
            self.weighted(&CONTENT_SOURCE_WEIGHTS)
        } else {
            0
        };

        let tag_score = self.weighted(&CONTENT_TAG_WEIGHTS);

        assemble(has_keyword, is_iframe, width, height, source_rank, tag_score)
    }

    fn weighted(&mut self, choices: &[(u8, u32)]) -> u8 {
        choices
            .choose_weighted(&mut self.rng, |(_, weight)| *weight)
            .map(|(value, _)| *value)
            .unwrap_or(0)
    }
}

/// Convenience wrapper: `n` samples from a fresh generator
pub fn generate_training_data(n: usize, seed: u64) -> Vec<LabeledSample> {
    SyntheticGenerator::new(seed).generate(n)
}

/// Derived features use the same helpers as inference-time extraction
fn assemble(
    keyword: bool,
    iframe: bool,
    width: i64,
    height: i64,
    source_rank: u8,
    tag_score: u8,
) -> FeatureVector {
    let (w, h) = (width as f64, height as f64);
    let area = w * h;

    FeatureVectorBuilder::new()
        .keyword_hit(keyword)
        .is_iframe(iframe)
        .dimensions(w, h, area)
        .keyword_source(source_rank)
        .aspect_ratio(aspect_ratio(w, h))
        .banner_sized(is_banner_sized(w, h))
        .large_area(is_large_area(area))
        .tag_score(tag_score)
        .build()
}
