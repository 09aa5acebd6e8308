//! Provider that lets a tool-capable model extract and geocode in one call

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_location_records;
use crate::prompt::{location_response_schema, SCHEMA_NAME, SYSTEM_PROMPT};
use async_trait::async_trait;
use geonext_domain::{ChatModel, ChatRequest, LocationProvider, LocationRecord, McpTool};
use tracing::{debug, info};

/// Tool-calling provider
///
/// The model receives the MCP geocoding server as a tool and must answer
/// with records conforming to the location schema.
pub struct ToolCallingProvider<M> {
    model: M,
    tool: McpTool,
    config: ExtractorConfig,
}

impl<M> ToolCallingProvider<M>
where
    M: ChatModel,
{
    /// Create a provider that exposes `tool` to `model`
    pub fn new(model: M, tool: McpTool, config: ExtractorConfig) -> Self {
        Self {
            model,
            tool,
            config,
        }
    }

    /// Access the underlying model
    pub fn model(&self) -> &M {
        &self.model
    }

    fn build_request(&self, text: &str) -> ChatRequest {
        ChatRequest::new(SYSTEM_PROMPT, text)
            .with_mcp_tool(self.tool.clone())
            .with_response_schema(SCHEMA_NAME, location_response_schema())
    }
}

#[async_trait]
impl<M> LocationProvider for ToolCallingProvider<M>
where
    M: ChatModel,
{
    type Error = ExtractorError;

    async fn run(&self, text: &str) -> Result<Vec<LocationRecord>, Self::Error> {
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(length, self.config.max_text_length));
        }

        let request = self.build_request(text);
        debug!("Tool-calling request, text length {} chars", length);

        let response = self
            .model
            .complete(&request)
            .await
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        debug!("Model response length: {} chars", response.len());

        let records = parse_location_records(&response)?;
        info!("Model returned {} geocoded locations", records.len());
        Ok(records)
    }
}
