//! Error types for the library API.

use thiserror::Error;

/// Errors related to the prompt store and its persisted document.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An error occurred while setting up the data directory or loading state.
    #[error("Failed to initialize store: {0}")]
    Init(String),

    /// Input to a create or update operation was rejected.
    #[error("Invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// The requested prompt could not be found by its ID.
    #[error("Prompt '{0}' not found")]
    NotFound(String),

    /// An import document does not have the expected top-level shape.
    #[error("Invalid import document: {0}")]
    InvalidDocument(String),

    /// A configuration value could not be understood.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An underlying file I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize data.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// A single import entry that was rejected. Collected into an
/// [`ImportReport`](super::ImportReport) rather than returned as a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("record #{index}: {field}: {reason}")]
pub struct MalformedRecord {
    /// Position of the record in the incoming `prompts` array.
    pub index: usize,
    /// Name of the offending field, or `record` when the entry itself is wrong.
    pub field: String,
    pub reason: String,
}

impl MalformedRecord {
    pub(crate) fn new(index: usize, field: &str, reason: impl Into<String>) -> Self {
        Self {
            index,
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
