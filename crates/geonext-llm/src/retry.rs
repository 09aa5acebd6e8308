//! Shared HTTP send loop with exponential backoff

use crate::LlmError;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::warn;

/// Default timeout for model requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per model call (no retries)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Build the HTTP client shared by the model clients
pub(crate) fn build_client() -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))
}

/// Send a request, retrying rate limits, server errors and transport failures
///
/// `make_request` is called once per attempt because a `RequestBuilder`
/// cannot be reused after sending.
pub(crate) async fn send_with_retry<F>(
    model: &str,
    max_attempts: u32,
    make_request: F,
) -> Result<Response, LlmError>
where
    F: Fn() -> RequestBuilder,
{
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;
        let err = match make_request().send().await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => error_from_response(model, response).await,
            Err(e) => LlmError::Communication(format!("Request failed: {}", e)),
        };

        if !err.is_retryable() || attempts >= max_attempts {
            return Err(err);
        }

        // Exponential backoff: 1s, 2s, 4s, etc.
        let delay = Duration::from_secs(2u64.pow(attempts - 1));
        warn!(
            "Model call failed (attempt {}/{}): {}; retrying in {:?}",
            attempts, max_attempts, err, delay
        );
        tokio::time::sleep(delay).await;
    }
}

/// Map a non-success HTTP response onto an error kind
pub(crate) async fn error_from_response(model: &str, response: Response) -> LlmError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Authentication(format!("HTTP {}: {}", status, body))
        }
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        _ if status.is_server_error() => LlmError::Server(format!("HTTP {}: {}", status, body)),
        _ => LlmError::InvalidRequest(format!("HTTP {}: {}", status, body)),
    }
}
