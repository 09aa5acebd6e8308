//! Mistral chat completions client
//!
//! Used by the two-step path: the model only lists place names and the
//! caller geocodes them. Requests that carry an MCP tool are rejected
//! because this endpoint cannot run remote tools.

use crate::retry::{build_client, send_with_retry, DEFAULT_MAX_ATTEMPTS};
use crate::LlmError;
use async_trait::async_trait;
use geonext_domain::{ChatModel, ChatRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default Mistral API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.mistral.ai";

/// Default model
pub const DEFAULT_MODEL: &str = "mistral-large-latest";

/// Mistral client using `/v1/chat/completions`
pub struct MistralClient {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    max_attempts: u32,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl MistralClient {
    /// Create a client against the public Mistral endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client: build_client()?,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Point the client at a different base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the number of attempts per call
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatModel for MistralClient {
    type Error = LlmError;

    async fn complete(&self, request: &ChatRequest) -> Result<String, Self::Error> {
        if request.mcp_tool.is_some() {
            return Err(LlmError::Unsupported(format!(
                "{} cannot call remote MCP tools",
                self.model
            )));
        }

        let url = format!("{}/v1/chat/completions", self.endpoint);
        let body = CompletionRequest {
            model: &self.model,
            messages: [
                Message {
                    role: "system",
                    content: &request.system,
                },
                Message {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: 0.0,
        };

        let response = send_with_retry(&self.model, self.max_attempts, || {
            self.client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
        })
        .await?;

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))?;

        debug!("Mistral response length: {} chars", content.len());
        Ok(content)
    }
}
