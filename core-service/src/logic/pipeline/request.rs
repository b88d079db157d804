//! Request Parsing
//!
//! Size check first, then JSON. Candidates stay raw `Value`s here; they are
//! only trusted after truncation and validation.

use serde_json::Value;

use super::error::PipelineError;

/// Top-level key carrying the candidate list
pub const CANDIDATES_FIELD: &str = "adCandidates";

/// Reject bodies above `limit` bytes without looking at them
pub fn check_size(body: &[u8], limit: usize) -> Result<(), PipelineError> {
    if body.len() > limit {
        return Err(PipelineError::PayloadTooLarge {
            size: body.len(),
            limit,
        });
    }
    Ok(())
}

/// Parse `{"adCandidates": [...]}` and hand back the raw array
pub fn parse_candidates(body: &[u8]) -> Result<Vec<Value>, PipelineError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PipelineError::MalformedRequest(format!("invalid JSON body: {}", e)))?;

    let Value::Object(mut map) = value else {
        return Err(PipelineError::MalformedRequest(
            "request body must be a JSON object".to_string(),
        ));
    };

    match map.remove(CANDIDATES_FIELD) {
        None | Some(Value::Null) => Err(PipelineError::MalformedRequest(format!(
            "missing {} in request body",
            CANDIDATES_FIELD
        ))),
        Some(Value::Array(candidates)) => Ok(candidates),
        Some(_) => Err(PipelineError::MalformedRequest(format!(
            "{} must be an array",
            CANDIDATES_FIELD
        ))),
    }
}
