//! Deterministic in-memory geocoder

use crate::error::McpError;
use async_trait::async_trait;
use geonext_domain::{GeocodeHit, Geocoder};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock geocoder for deterministic testing
///
/// Unknown queries resolve to `None`. Queries registered with
/// [`MockGeocoder::add_failure`] return a tool error.
///
/// # Examples
///
/// ```
/// use geonext_mcp::MockGeocoder;
/// use geonext_domain::{GeocodeHit, Geocoder};
///
/// # tokio_test::block_on(async {
/// let mut geocoder = MockGeocoder::new();
/// geocoder.add_hit("Odense", GeocodeHit::new(55.4038, 10.4024));
/// assert!(geocoder.geocode("Odense").await.unwrap().is_some());
/// assert!(geocoder.geocode("Atlantis").await.unwrap().is_none());
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockGeocoder {
    hits: HashMap<String, Result<GeocodeHit, String>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockGeocoder {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `query` to `hit`
    pub fn add_hit(&mut self, query: impl Into<String>, hit: GeocodeHit) {
        self.hits.insert(query.into(), Ok(hit));
    }

    /// Make `query` fail with a tool error
    pub fn add_failure(&mut self, query: impl Into<String>, message: impl Into<String>) {
        self.hits.insert(query.into(), Err(message.into()));
    }

    /// Queries received so far, in call order
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    type Error = McpError;

    async fn geocode(&self, query: &str) -> Result<Option<GeocodeHit>, Self::Error> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }

        match self.hits.get(query) {
            Some(Ok(hit)) => Ok(Some(hit.clone())),
            Some(Err(message)) => Err(McpError::Tool(message.clone())),
            None => Ok(None),
        }
    }
}
