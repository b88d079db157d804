//! Candidate Validation
//!
//! Structural checks on untrusted candidate JSON, applied in order:
//! 1. the record is an object
//! 2. `tag`, `width`, `height`, `area` are present
//! 3. `width`, `height`, `area` are non-negative numbers
//!
//! A record that passes is converted once into a `CandidateRecord`; every
//! later stage works on the typed form.

use std::fmt;

use serde_json::{Map, Value};

use super::types::{CandidateRecord, KeywordSource};

/// Fields every candidate must carry
pub const REQUIRED_FIELDS: [&str; 4] = ["tag", "width", "height", "area"];

/// Fields that must be non-negative numbers
pub const NUMERIC_FIELDS: [&str; 3] = ["width", "height", "area"];

// ============================================================================
// ERRORS
// ============================================================================

/// Why a single candidate was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    NotAnObject,
    MissingField(&'static str),
    InvalidField(&'static str),
}

impl RejectReason {
    /// The offending field, when there is one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RejectReason::NotAnObject => None,
            RejectReason::MissingField(f) | RejectReason::InvalidField(f) => Some(f),
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotAnObject => write!(f, "must be an object"),
            RejectReason::MissingField(field) => write!(f, "missing required field: {}", field),
            RejectReason::InvalidField(field) => write!(f, "invalid {}", field),
        }
    }
}

/// A candidate failed validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("candidate[{index}]: {reason}")]
pub struct CandidateError {
    pub index: usize,
    pub reason: RejectReason,
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Validate a raw candidate and convert it to a `CandidateRecord`
pub fn validate_candidate(raw: &Value, index: usize) -> Result<CandidateRecord, CandidateError> {
    let map = check_object(raw, index)?;
    Ok(build_record(map))
}

/// Validate a whole batch. The first invalid record rejects everything.
pub fn validate_batch(raw: &[Value]) -> Result<Vec<CandidateRecord>, CandidateError> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| validate_candidate(value, index))
        .collect()
}

fn check_object(raw: &Value, index: usize) -> Result<&Map<String, Value>, CandidateError> {
    let reject = |reason| CandidateError { index, reason };

    let map = raw.as_object().ok_or_else(|| reject(RejectReason::NotAnObject))?;

    for field in REQUIRED_FIELDS {
        if matches!(map.get(field), None | Some(Value::Null)) {
            return Err(reject(RejectReason::MissingField(field)));
        }
    }

    for field in NUMERIC_FIELDS {
        let valid = map
            .get(field)
            .and_then(Value::as_f64)
            .map_or(false, |n| n.is_finite() && n >= 0.0);
        if !valid {
            return Err(reject(RejectReason::InvalidField(field)));
        }
    }

    Ok(map)
}

// ============================================================================
// DEFAULTING
// ============================================================================

fn build_record(map: &Map<String, Value>) -> CandidateRecord {
    let mut faults = Vec::new();

    let key_word_source = match map.get("keyWordSource") {
        None | Some(Value::Null) => KeywordSource::None,
        Some(Value::String(s)) => KeywordSource::parse(s),
        Some(_) => {
            faults.push("keyWordSource");
            KeywordSource::None
        }
    };

    let key_word_match = match map.get("keyWordMatch") {
        Some(Value::String(s)) => Some(s.clone()),
        None | Some(Value::Null) => None,
        Some(_) => {
            faults.push("keyWordMatch");
            None
        }
    };

    CandidateRecord {
        key_word_hit: truthy(map.get("keyWordHit")),
        key_word_source,
        key_word_match,
        is_iframe: truthy(map.get("isIframe")),
        tag: string_field(map, "tag", &mut faults),
        id: string_field(map, "id", &mut faults),
        class_list: string_field(map, "classList", &mut faults),
        width: number_field(map, "width"),
        height: number_field(map, "height"),
        area: number_field(map, "area"),
        schema_faults: faults,
    }
}

/// JSON truthiness: false, null, 0, "", [] and {} are false
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

fn string_field(map: &Map<String, Value>, key: &'static str, faults: &mut Vec<&'static str>) -> String {
    match map.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            faults.push(key);
            String::new()
        }
    }
}

fn number_field(map: &Map<String, Value>, key: &str) -> f64 {
    map.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}
