//! Error types for the input and loading layers
//!
//! The projection engine itself never fails; these errors come from parsing
//! user edits, reading default tables and decoding requests.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProposalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown proposal type: {0}")]
    UnknownSegment(String),

    #[error("Unknown input field: {0}")]
    UnknownField(String),

    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("Invalid flag for {field}: {value:?} (expected true/false)")]
    InvalidFlag { field: String, value: String },

    #[error("Malformed edit {0:?} (expected field=value)")]
    MalformedEdit(String),
}

pub type Result<T> = std::result::Result<T, ProposalError>;
