//! Error types for geocoding tool calls.

use thiserror::Error;

/// MCP client error types
#[derive(Error, Debug)]
pub enum McpError {
    /// Transport failure or non-success HTTP status
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response body did not match the tool call envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The tool itself reported a failure
    #[error("Tool error: {0}")]
    Tool(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<reqwest::Error> for McpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            McpError::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            McpError::Communication(format!("HTTP {}: {}", status, e))
        } else {
            McpError::Communication(e.to_string())
        }
    }
}
