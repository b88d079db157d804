//! Pipeline Module - `/predict` end to end
//!
//! Transport-agnostic: the server hands over the raw body and a request id,
//! and maps `PipelineError` onto HTTP statuses.

pub mod config;
pub mod engine;
pub mod error;
pub mod request;
pub mod response;


pub use config::PipelineConfig;
pub use engine::PredictionPipeline;
pub use error::PipelineError;
pub use request::{check_size, parse_candidates, CANDIDATES_FIELD};
pub use response::{PredictResponse, PredictionResult};

/// Short correlation id attached to every response
pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
