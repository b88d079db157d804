//! Sizing & Tag Heuristics
//!
//! Derived features shared by inference (`extract.rs`) and the synthetic
//! training generator, so both sides compute them identically.

/// Aspect ratios saturate here so wide banners can't dominate the classifier
pub const ASPECT_RATIO_CAP: f64 = 10.0;

/// Area (px²) above which an element counts as large
pub const LARGE_AREA_THRESHOLD: f64 = 100_000.0;

/// Minimum dimensions of a canonical ad creative class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerRule {
    pub name: &'static str,
    pub min_width: f64,
    pub min_height: f64,
}

impl BannerRule {
    pub fn matches(&self, width: f64, height: f64) -> bool {
        width >= self.min_width && height >= self.min_height
    }
}

/// Size classes checked by `is_banner_sized`
pub const BANNER_RULES: [BannerRule; 4] = [
    BannerRule { name: "leaderboard", min_width: 728.0, min_height: 90.0 },
    BannerRule { name: "medium_rectangle", min_width: 300.0, min_height: 250.0 },
    BannerRule { name: "wide_skyscraper", min_width: 160.0, min_height: 600.0 },
    BannerRule { name: "mobile_banner", min_width: 320.0, min_height: 50.0 },
];

/// Tag scores; lookup is case-insensitive, other tags score 0
pub const TAG_SCORES: [(&str, u8); 5] = [
    ("IFRAME", 3),
    ("DIV", 2),
    ("IMG", 1),
    ("SECTION", 1),
    ("ASIDE", 1),
];

/// width / height, 0 when height is not positive, capped at `ASPECT_RATIO_CAP`
pub fn aspect_ratio(width: f64, height: f64) -> f64 {
    if height > 0.0 {
        (width / height).min(ASPECT_RATIO_CAP)
    } else {
        0.0
    }
}

pub fn is_banner_sized(width: f64, height: f64) -> bool {
    BANNER_RULES.iter().any(|rule| rule.matches(width, height))
}

/// First banner rule the dimensions satisfy, for logging
pub fn banner_class(width: f64, height: f64) -> Option<&'static str> {
    BANNER_RULES
        .iter()
        .find(|rule| rule.matches(width, height))
        .map(|rule| rule.name)
}

pub fn is_large_area(area: f64) -> bool {
    area > LARGE_AREA_THRESHOLD
}

pub fn tag_score(tag: &str) -> u8 {
    TAG_SCORES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(tag))
        .map(|(_, score)| *score)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_rule_boundaries() {
        let cases = [
            // Leaderboard (every leaderboard also satisfies the mobile rule)
            (728.0, 90.0, true),
            (727.0, 90.0, true),
            (728.0, 49.0, false),
            // Medium rectangle
            (300.0, 250.0, true),
            (299.0, 250.0, false),
            (300.0, 249.0, false),
            // Wide skyscraper
            (160.0, 600.0, true),
            (159.0, 600.0, false),
            (160.0, 599.0, false),
            // Mobile banner
            (320.0, 50.0, true),
            (319.0, 50.0, false),
            (320.0, 49.0, false),
            // Nothing
            (0.0, 0.0, false),
            (100.0, 100.0, false),
        ];

        for (w, h, expected) in cases {
            assert_eq!(is_banner_sized(w, h), expected, "{}x{}", w, h);
        }
    }

    #[test]
    fn test_banner_grid_matches_rules() {
        let widths = [0.0, 159.0, 160.0, 299.0, 300.0, 319.0, 320.0, 727.0, 728.0, 1000.0];
        let heights = [0.0, 49.0, 50.0, 89.0, 90.0, 249.0, 250.0, 599.0, 600.0, 800.0];

        for &w in &widths {
            for &h in &heights {
                let expected = (w >= 728.0 && h >= 90.0)
                    || (w >= 300.0 && h >= 250.0)
                    || (w >= 160.0 && h >= 600.0)
                    || (w >= 320.0 && h >= 50.0);
                assert_eq!(is_banner_sized(w, h), expected, "{}x{}", w, h);
            }
        }
    }

    #[test]
    fn test_banner_class() {
        assert_eq!(banner_class(728.0, 90.0), Some("leaderboard"));
        assert_eq!(banner_class(160.0, 600.0), Some("wide_skyscraper"));
        assert_eq!(banner_class(10.0, 10.0), None);
    }

    #[test]
    fn test_aspect_ratio_bounds() {
        assert_eq!(aspect_ratio(100.0, 0.0), 0.0);
        assert_eq!(aspect_ratio(0.0, 100.0), 0.0);
        assert_eq!(aspect_ratio(2000.0, 10.0), ASPECT_RATIO_CAP);
        assert!((aspect_ratio(728.0, 90.0) - 8.0889).abs() < 1e-3);

        for w in [0.0, 1.0, 50.0, 728.0, 1e6] {
            for h in [0.0, 0.5, 1.0, 90.0, 1e6] {
                let r = aspect_ratio(w, h);
                assert!((0.0..=ASPECT_RATIO_CAP).contains(&r), "{}x{} -> {}", w, h, r);
            }
        }
    }

    #[test]
    fn test_large_area_is_strict() {
        assert!(!is_large_area(100_000.0));
        assert!(is_large_area(100_001.0));
    }

    #[test]
    fn test_tag_score_case_insensitive() {
        assert_eq!(tag_score("IFRAME"), 3);
        assert_eq!(tag_score("iframe"), 3);
        assert_eq!(tag_score("Div"), 2);
        assert_eq!(tag_score("img"), 1);
        assert_eq!(tag_score("SECTION"), 1);
        assert_eq!(tag_score("aside"), 1);
        assert_eq!(tag_score("ARTICLE"), 0);
        assert_eq!(tag_score(""), 0);
    }
}
