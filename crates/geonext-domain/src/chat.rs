//! Chat request passed to model providers

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Remote MCP server a tool-capable model may call during a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpTool {
    /// Server URL reachable by the model provider
    pub server_url: String,

    /// Label the model sees for the server
    pub server_label: String,
}

impl McpTool {
    /// Create a tool attachment
    pub fn new(server_url: impl Into<String>, server_label: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            server_label: server_label.into(),
        }
    }
}

/// Named JSON schema the response must conform to
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    /// Schema name reported to the provider
    pub name: String,

    /// JSON Schema document
    pub schema: Value,
}

/// A single-turn chat request: system instructions plus one user message
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// System prompt
    pub system: String,

    /// User message (the document text)
    pub user: String,

    /// Tool server the model may call
    pub mcp_tool: Option<McpTool>,

    /// Structured output format
    pub response_schema: Option<ResponseSchema>,
}

impl ChatRequest {
    /// Create a plain request without tools or response schema
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            mcp_tool: None,
            response_schema: None,
        }
    }

    /// Allow the model to call an MCP server
    pub fn with_mcp_tool(mut self, tool: McpTool) -> Self {
        self.mcp_tool = Some(tool);
        self
    }

    /// Constrain the response to a JSON schema
    pub fn with_response_schema(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.response_schema = Some(ResponseSchema {
            name: name.into(),
            schema,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = ChatRequest::new("sys", "user text")
            .with_mcp_tool(McpTool::new("http://localhost:8000/mcp/", "geonext"))
            .with_response_schema("locations", serde_json::json!({"type": "object"}));

        assert_eq!(request.system, "sys");
        assert_eq!(request.user, "user text");
        assert_eq!(request.mcp_tool.unwrap().server_label, "geonext");
        assert_eq!(request.response_schema.unwrap().name, "locations");
    }
}
