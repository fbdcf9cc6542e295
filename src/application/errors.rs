//! Application layer error types

use crate::domain::ValidationError;
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the analyzer round trip. Produced by transport
/// implementations; this crate only defines the shape.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Analyzer unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("Analyzer response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Analyzer did not answer within {seconds}s")]
    Timeout { seconds: u64 },
}
