//! Integration Tests for Feature Extraction
//!
//! Validated JSON candidates through the extractor, end to end.

#[cfg(test)]
mod integration_tests {
    use serde_json::json;

    use crate::logic::candidate::{validate_candidate, CandidateRecord};
    use crate::logic::features::{
        extract_features, try_extract, Extraction, ExtractionFault, FEATURE_COUNT,
    };
    use crate::logic::features::sizing::{banner_class, is_banner_sized};

    fn assert_close(actual: &[f32], expected: &[f32], tolerance: f32) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() <= tolerance, "feature {}: {} vs {}", i, a, e);
        }
    }

    #[test]
    fn test_iframe_ad_vector() {
        let record = validate_candidate(
            &json!({
                "keyWordHit": true,
                "keyWordSource": "id",
                "isIframe": true,
                "tag": "IFRAME",
                "id": "google-ad-1",
                "classList": "advertisement",
                "width": 728,
                "height": 90,
                "area": 65520
            }),
            0,
        )
        .unwrap();

        let extraction = extract_features(&record);
        assert!(!extraction.is_fallback());
        assert_close(
            extraction.vector().as_slice(),
            &[1.0, 1.0, 728.0, 90.0, 65520.0, 3.0, 8.09, 1.0, 0.0, 3.0],
            0.01,
        );
    }

    #[test]
    fn test_article_vector() {
        let record = validate_candidate(
            &json!({
                "keyWordHit": false,
                "isIframe": false,
                "tag": "ARTICLE",
                "id": "main-content",
                "classList": "article-body content",
                "width": 700,
                "height": 1200,
                "area": 840000
            }),
            0,
        )
        .unwrap();

        // 700x1200 clears the medium-rectangle rule
        let vector = try_extract(&record).unwrap();
        assert!(is_banner_sized(700.0, 1200.0));
        assert_eq!(banner_class(700.0, 1200.0), Some("medium_rectangle"));
        assert_close(
            vector.as_slice(),
            &[0.0, 0.0, 700.0, 1200.0, 840000.0, 0.0, 0.583, 1.0, 1.0, 0.0],
            0.001,
        );
    }

    #[test]
    fn test_minimal_record_has_full_length() {
        let record = CandidateRecord::new("", 0.0, 0.0, 0.0);
        let extraction = extract_features(&record);

        assert_eq!(extraction.vector().len(), FEATURE_COUNT);
        assert!(extraction.vector().is_zero());
        assert!(!extraction.is_fallback());
    }

    #[test]
    fn test_schema_fault_falls_back_to_zeros() {
        let record = validate_candidate(
            &json!({ "keyWordHit": true, "tag": 42, "width": 300, "height": 250, "area": 75000 }),
            3,
        )
        .unwrap();

        let extraction = extract_features(&record);
        assert!(extraction.is_fallback());
        assert_eq!(extraction.fault(), Some(&ExtractionFault::SchemaFault("tag")));
        assert_eq!(extraction.vector().len(), FEATURE_COUNT);
        assert!(extraction.vector().is_zero());
    }

    #[test]
    fn test_selector_only_fault_does_not_fall_back() {
        let record = validate_candidate(
            &json!({ "tag": "DIV", "classList": ["a", "b"], "width": 300, "height": 250, "area": 75000 }),
            0,
        )
        .unwrap();

        assert!(!extract_features(&record).is_fallback());
    }

    #[test]
    fn test_overflowing_magnitude_falls_back() {
        let record = validate_candidate(
            &json!({ "tag": "DIV", "width": 1e300, "height": 1.0, "area": 1e300 }),
            0,
        )
        .unwrap();

        match extract_features(&record) {
            Extraction::Fallback { vector, reason: ExtractionFault::NonFinite { name, .. } } => {
                assert_eq!(name, "width");
                assert!(vector.is_zero());
            }
            other => panic!("expected non-finite fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_aspect_ratio_always_bounded() {
        for (w, h) in [(0.0, 0.0), (5000.0, 1.0), (1.0, 5000.0), (970.0, 250.0), (1e9, 1e-3)] {
            let record = CandidateRecord::new("DIV", w, h, w * h);
            if let Ok(vector) = try_extract(&record) {
                let ratio = vector.get_by_name("aspect_ratio").unwrap();
                assert!((0.0..=10.0).contains(&ratio), "{}x{} -> {}", w, h, ratio);
            }
        }
    }
}
