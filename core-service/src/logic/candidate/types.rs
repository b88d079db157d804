//! Candidate Types
//!
//! Typed form of an element description sent by the browser extension.
//! Raw JSON becomes a `CandidateRecord` only after `validate::validate_candidate`.

use serde::{Deserialize, Serialize};

/// Where the ad keyword matched on the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordSource {
    #[default]
    None,
    Text,
    Class,
    Id,
    /// Any other string the extension sent
    Unknown,
}

impl KeywordSource {
    /// Parse the wire value. Matching is exact, like the extension emits it.
    pub fn parse(value: &str) -> Self {
        match value {
            "none" => KeywordSource::None,
            "text" => KeywordSource::Text,
            "class" => KeywordSource::Class,
            "id" => KeywordSource::Id,
            _ => KeywordSource::Unknown,
        }
    }

    /// Reliability rank: an id match is the strongest signal, text the weakest.
    pub fn rank(self) -> u8 {
        match self {
            KeywordSource::Id => 3,
            KeywordSource::Class => 2,
            KeywordSource::Text => 1,
            KeywordSource::None | KeywordSource::Unknown => 0,
        }
    }
}

/// A validated, fully-typed ad candidate.
///
/// Optional fields have already been defaulted. Fields that were present
/// with an incompatible JSON type are listed in `schema_faults`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub key_word_hit: bool,
    pub key_word_source: KeywordSource,
    pub key_word_match: Option<String>,
    pub is_iframe: bool,
    pub tag: String,
    pub id: String,
    pub class_list: String,
    pub width: f64,
    pub height: f64,
    pub area: f64,
    #[serde(skip)]
    pub schema_faults: Vec<&'static str>,
}

impl CandidateRecord {
    /// Minimal record with only the required fields set
    pub fn new(tag: &str, width: f64, height: f64, area: f64) -> Self {
        Self {
            tag: tag.to_string(),
            width,
            height,
            area,
            ..Default::default()
        }
    }

    pub fn has_fault(&self, field: &str) -> bool {
        self.schema_faults.iter().any(|f| *f == field)
    }
}
