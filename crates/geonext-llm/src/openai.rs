//! OpenAI Responses API client
//!
//! The tool-calling path: the model is handed the MCP geocoding server as
//! a remote tool and runs the whole extract-then-geocode loop on the
//! provider side. Only the final assistant message is read back.
//!
//! When a responses directory is configured, every raw reply body is also
//! written there as `response_<timestamp>.json` for later inspection.
//!
//! # Examples
//!
//! ```no_run
//! use geonext_llm::OpenAiClient;
//!
//! let client = OpenAiClient::new("sk-...", "gpt-4o-mini").unwrap();
//! ```

use crate::retry::{build_client, send_with_retry, DEFAULT_MAX_ATTEMPTS};
use crate::LlmError;
use async_trait::async_trait;
use geonext_domain::{ChatModel, ChatRequest};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default OpenAI API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

/// Default tool-capable model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// The only MCP tool the model may call
pub const GEOCODE_TOOL: &str = "geocode_location";

/// OpenAI client using the `/v1/responses` endpoint
pub struct OpenAiClient {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    max_attempts: u32,
    responses_dir: Option<PathBuf>,
}

/// Request body for the Responses API
#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parallel_tool_calls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<Value>,
    temperature: f32,
}

#[derive(Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Subset of the Responses API result we rely on
#[derive(Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl OpenAiClient {
    /// Create a client against the public OpenAI endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client: build_client()?,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            responses_dir: None,
        })
    }

    /// Point the client at a different base URL (proxies, test servers)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the number of attempts per call
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Keep a copy of every raw reply body under `dir`
    pub fn with_responses_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.responses_dir = Some(dir.into());
        self
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Directory raw replies are archived to, if any
    pub fn responses_dir(&self) -> Option<&Path> {
        self.responses_dir.as_deref()
    }

    /// Archive a raw reply. Failures are logged and otherwise ignored.
    fn save_raw_response(&self, body: &Value) {
        let Some(dir) = &self.responses_dir else {
            return;
        };

        let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%6f");
        let path = dir.join(format!("response_{}.json", stamp));

        let written = fs::create_dir_all(dir)
            .and_then(|_| File::create(&path))
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                serde_json::to_writer_pretty(&mut writer, body)?;
                writer.flush()
            });

        match written {
            Ok(()) => debug!("Saved raw response to {}", path.display()),
            Err(e) => warn!("Failed to write raw response to {}: {}", path.display(), e),
        }
    }

    fn build_body<'a>(&'a self, request: &'a ChatRequest) -> ResponsesRequest<'a> {
        let tools = request
            .mcp_tool
            .iter()
            .map(|tool| {
                json!({
                    "type": "mcp",
                    "server_url": tool.server_url,
                    "server_label": tool.server_label,
                    "allowed_tools": [GEOCODE_TOOL],
                    "require_approval": "never",
                })
            })
            .collect::<Vec<_>>();
        let has_tools = !tools.is_empty();

        let text = request.response_schema.as_ref().map(|schema| {
            json!({
                "format": {
                    "type": "json_schema",
                    "name": schema.name,
                    "schema": schema.schema,
                    "strict": true,
                }
            })
        });

        ResponsesRequest {
            model: &self.model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: &request.system,
                },
                InputMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            tools,
            tool_choice: has_tools.then_some("auto"),
            parallel_tool_calls: has_tools.then_some(false),
            text,
            temperature: 0.0,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    type Error = LlmError;

    async fn complete(&self, request: &ChatRequest) -> Result<String, Self::Error> {
        let url = format!("{}/v1/responses", self.endpoint);
        let body = self.build_body(request);

        let response = send_with_retry(&self.model, self.max_attempts, || {
            self.client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
        })
        .await?;

        let raw: Value = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        self.save_raw_response(&raw);

        let parsed: ResponsesResponse = serde_json::from_value(raw)
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = parsed.error {
            return Err(LlmError::InvalidResponse(error.message));
        }

        // Earlier messages are commentary around tool calls; the final one
        // carries the structured answer.
        let text: String = parsed
            .output
            .iter()
            .rev()
            .find(|item| item.kind == "message")
            .map(|item| {
                item.content
                    .iter()
                    .filter(|part| part.kind == "output_text")
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LlmError::InvalidResponse(
                "Response contained no output text".to_string(),
            ));
        }

        debug!("OpenAI response length: {} chars", text.len());
        Ok(text)
    }
}
