//! Domain-specific error types

use thiserror::Error;

/// The single error kind raised at construction or deserialization time.
///
/// There is no partial-construction state: an entity either fully satisfies
/// its invariants or it does not exist. Malformed JSON handed to a
/// `from_json` entry point surfaces here too, so callers have one error type
/// to handle for all construction failures.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Field {field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("Invalid line range: start {start} is greater than end {end}")]
    InvalidLineRange { start: u32, end: u32 },

    #[error("Unknown severity: {value}")]
    UnknownSeverity { value: String },

    #[error("Unknown vulnerability category: {value}")]
    UnknownCategory { value: String },

    #[error("Malformed input: {0}")]
    Json(#[from] serde_json::Error),
}
