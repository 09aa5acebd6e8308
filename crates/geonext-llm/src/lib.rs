//! GeoNeXt LLM Provider Layer
//!
//! Chat-model implementations of the `ChatModel` trait from `geonext-domain`.
//!
//! # Providers
//!
//! - `MockChatModel`: Deterministic mock for testing
//! - `OpenAiClient`: OpenAI Responses API, can attach a remote MCP tool
//! - `MistralClient`: Mistral chat completions, plain text only
//!
//! # Examples
//!
//! ```
//! use geonext_llm::MockChatModel;
//! use geonext_domain::{ChatModel, ChatRequest};
//!
//! # tokio_test::block_on(async {
//! let model = MockChatModel::new("[]");
//! let reply = model.complete(&ChatRequest::new("system", "text")).await.unwrap();
//! assert_eq!(reply, "[]");
//! # });
//! ```

#![warn(missing_docs)]

pub mod mistral;
pub mod openai;
mod retry;

use async_trait::async_trait;
use geonext_domain::{ChatModel, ChatRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use mistral::MistralClient;
pub use openai::OpenAiClient;
pub use retry::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Provider-side failure (HTTP 5xx)
    #[error("Server error: {0}")]
    Server(String),

    /// Request rejected by the provider (HTTP 4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or rejected API key
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Request uses a capability the model does not have
    #[error("Unsupported request: {0}")]
    Unsupported(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::Communication(_) | LlmError::Server(_) | LlmError::RateLimitExceeded
        )
    }
}

/// Mock chat model for deterministic testing
///
/// Returns pre-configured responses keyed by the request's user text,
/// without making any network calls. Every request is recorded.
///
/// # Examples
///
/// ```
/// use geonext_llm::MockChatModel;
/// use geonext_domain::{ChatModel, ChatRequest};
///
/// # tokio_test::block_on(async {
/// let mut model = MockChatModel::default();
/// model.add_response("Odense", r#"["Odense, Denmark"]"#);
/// let reply = model.complete(&ChatRequest::new("sys", "Odense")).await.unwrap();
/// assert_eq!(reply, r#"["Odense, Denmark"]"#);
/// assert_eq!(model.call_count(), 1);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockChatModel {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Result<String, String>>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockChatModel {
    /// Create a mock with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given user text
    pub fn add_response(&mut self, user_text: impl Into<String>, response: impl Into<String>) {
        self.lock_responses()
            .insert(user_text.into(), Ok(response.into()));
    }

    /// Configure to fail for a specific user text
    pub fn add_error(&mut self, user_text: impl Into<String>, message: impl Into<String>) {
        self.lock_responses()
            .insert(user_text.into(), Err(message.into()));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.lock_requests().len()
    }

    /// All requests received so far, oldest first
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.lock_requests().clone()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, HashMap<String, Result<String, String>>> {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<ChatRequest>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new("[]")
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    type Error = LlmError;

    async fn complete(&self, request: &ChatRequest) -> Result<String, Self::Error> {
        self.lock_requests().push(request.clone());

        match self.lock_responses().get(&request.user) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(LlmError::Other(message.clone())),
            None => Ok(self.default_response.clone()),
        }
    }
}
