//! Candidate Module - Untrusted element descriptions
//!
//! Validation and defaulting happen here, once. Downstream stages
//! (features, selector, pipeline) only ever see `CandidateRecord`.

pub mod types;
pub mod validate;


pub use types::{CandidateRecord, KeywordSource};
pub use validate::{validate_batch, validate_candidate, CandidateError, RejectReason};
