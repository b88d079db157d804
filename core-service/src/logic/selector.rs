//! Selector Builder
//!
//! Best-effort CSS locator for a candidate, used by the extension to hide
//! the element. Precedence: `#id`, then `.firstClass`, then the tag name.
//! Nothing is escaped, so callers must tolerate selectors that don't parse.

use crate::logic::candidate::CandidateRecord;

/// Tag used when the candidate has no usable tag name
pub const DEFAULT_SELECTOR_TAG: &str = "div";

pub fn build_selector(record: &CandidateRecord) -> String {
    let id = record.id.trim();
    if !id.is_empty() {
        return format!("#{}", id);
    }

    if let Some(first_class) = record.class_list.split_whitespace().next() {
        return format!(".{}", first_class);
    }

    let tag = record.tag.trim();
    if tag.is_empty() {
        DEFAULT_SELECTOR_TAG.to_string()
    } else {
        tag.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tag: &str, id: &str, class_list: &str) -> CandidateRecord {
        CandidateRecord {
            id: id.to_string(),
            class_list: class_list.to_string(),
            ..CandidateRecord::new(tag, 0.0, 0.0, 0.0)
        }
    }

    #[test]
    fn test_id_wins() {
        assert_eq!(build_selector(&record("IFRAME", "google-ad-1", "advertisement")), "#google-ad-1");
        assert_eq!(build_selector(&record("DIV", "  padded  ", "x")), "#padded");
    }

    #[test]
    fn test_first_class_when_no_id() {
        assert_eq!(build_selector(&record("DIV", "", "ad-banner sidebar")), ".ad-banner");
        assert_eq!(build_selector(&record("DIV", "   ", "  sponsored-post\tcard ")), ".sponsored-post");
    }

    #[test]
    fn test_tag_fallback() {
        assert_eq!(build_selector(&record("ASIDE", "", "")), "aside");
        assert_eq!(build_selector(&record("IMG", " ", "   ")), "img");
        assert_eq!(build_selector(&record("", "", "")), "div");
    }

    #[test]
    fn test_no_escaping() {
        assert_eq!(build_selector(&record("DIV", "ad:slot[1]", "")), "#ad:slot[1]");
    }
}
