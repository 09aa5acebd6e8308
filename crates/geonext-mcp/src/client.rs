//! HTTP client for the geocoding tool server

use crate::error::McpError;
use crate::protocol::{ToolCallRequest, ToolCallResponse};
use async_trait::async_trait;
use geonext_domain::{GeocodeHit, Geocoder};
use std::time::Duration;
use tracing::debug;

/// Default MCP server URL
pub const DEFAULT_MCP_URL: &str = "http://localhost:8000/mcp/";

/// Default timeout for a single tool call (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Geocoder backed by the MCP server's `geocode_location` tool
pub struct McpGeocoder {
    base_url: String,
    client: reqwest::Client,
}

impl McpGeocoder {
    /// Create a client for the server at `server_url`
    ///
    /// A trailing slash on `server_url` is ignored.
    pub fn new(server_url: &str) -> Result<Self, McpError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| McpError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: server_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// URL of the tool call route
    pub fn call_url(&self) -> String {
        format!("{}/call", self.base_url)
    }
}

#[async_trait]
impl Geocoder for McpGeocoder {
    type Error = McpError;

    async fn geocode(&self, query: &str) -> Result<Option<GeocodeHit>, Self::Error> {
        let response = self
            .client
            .post(self.call_url())
            .json(&ToolCallRequest::geocode(query, 1))
            .send()
            .await?
            .error_for_status()?;

        let body: ToolCallResponse = response.json().await?;

        if let Some(error) = body.error {
            return Err(McpError::Tool(error));
        }

        let first = match body.result.and_then(|hits| hits.into_iter().next()) {
            Some(hit) => hit,
            None => {
                debug!("No geocoder candidates for '{}'", query);
                return Ok(None);
            }
        };

        let hit: GeocodeHit = serde_json::from_value(first)
            .map_err(|e| McpError::InvalidResponse(format!("Malformed candidate: {}", e)))?;
        Ok(Some(hit))
    }
}
