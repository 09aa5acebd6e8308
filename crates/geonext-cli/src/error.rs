//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chat model client error
    #[error("LLM error: {0}")]
    Llm(#[from] geonext_llm::LlmError),

    /// Geocoding client error
    #[error("Geocoder error: {0}")]
    Mcp(#[from] geonext_mcp::McpError),

    /// Batch run error
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] geonext_pipeline::PipelineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    Logging(String),
}
