//! Error types for the Sifter library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sifter operations.
#[derive(Debug, Error)]
pub enum SifterError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing CSV/TSV data.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Dataset is not rectangular or has unusable column names.
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error talking to a language-model provider.
    #[error("LLM error ({provider}): {message}")]
    Llm { provider: String, message: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SifterError {
    pub(crate) fn llm(provider: &str, message: impl Into<String>) -> Self {
        SifterError::Llm {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for Sifter operations.
pub type Result<T> = std::result::Result<T, SifterError>;
