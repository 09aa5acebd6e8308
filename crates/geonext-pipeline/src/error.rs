//! Error types for batch runs

use thiserror::Error;

/// Errors that can occur during a batch run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing results failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input file is missing, unreadable or not a JSON array
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Existing results file holds more entries than there are inputs
    #[error("Results file has {existing} entries but input has only {total} items")]
    ResumeMismatch {
        /// Entries already on disk
        existing: usize,
        /// Items in the input
        total: usize,
    },

    /// Provider failed and the run was halted
    #[error("Provider failed on item {index}: {message}")]
    Provider {
        /// Index of the failing item
        index: usize,
        /// Provider error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
