//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the
//! network services it talks to. Implementations live in other crates.

use crate::{ChatRequest, GeocodeHit, LocationRecord};
use async_trait::async_trait;

/// Turns one document's text into the places it mentions
///
/// Implemented by the application layer (geonext-extractor)
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Error type for provider operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extract and geocode every distinct place mentioned in `text`
    async fn run(&self, text: &str) -> Result<Vec<LocationRecord>, Self::Error>;
}

/// Trait for chat-completion model operations
///
/// Implemented by the infrastructure layer (geonext-llm)
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Error type for model operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send a single-turn request and return the model's final text output
    async fn complete(&self, request: &ChatRequest) -> Result<String, Self::Error>;
}

/// Trait for geocode-by-name lookups
///
/// Implemented by the infrastructure layer (geonext-mcp)
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Error type for geocoding operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return the best candidate for `query`, or `None` if nothing matched
    async fn geocode(&self, query: &str) -> Result<Option<GeocodeHit>, Self::Error>;
}
