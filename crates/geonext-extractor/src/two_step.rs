//! Provider that asks a model for place names and geocodes them itself

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_place_names;
use crate::prompt::FALLBACK_PROMPT;
use async_trait::async_trait;
use geonext_domain::{
    ChatModel, ChatRequest, CoordinateKey, GeocodeHit, Geocoder, LocationProvider, LocationRecord,
};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

/// Status recorded on records produced by this provider
pub const GEOCODED_STATUS: &str = "geocoded";

/// Reasoning recorded on records produced by this provider
pub const TOP_CANDIDATE_REASONING: &str =
    "Top-ranked geocoder candidate for the model-supplied query";

/// Two-step provider: list names with the model, then geocode each one
///
/// Results whose rounded coordinates collide with an earlier result are
/// dropped; the first one wins.
pub struct TwoStepProvider<M, G> {
    model: M,
    geocoder: G,
    config: ExtractorConfig,
}

impl<M, G> TwoStepProvider<M, G>
where
    M: ChatModel,
    G: Geocoder,
{
    /// Create a provider from a plain chat model and a geocoder
    pub fn new(model: M, geocoder: G, config: ExtractorConfig) -> Self {
        Self {
            model,
            geocoder,
            config,
        }
    }

    /// Access the underlying model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Access the underlying geocoder
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    fn to_record(&self, query: &str, hit: GeocodeHit) -> LocationRecord {
        LocationRecord {
            name: query.to_string(),
            address: hit.address.unwrap_or_else(|| query.to_string()),
            latitude: hit.latitude,
            longitude: hit.longitude,
            confidence: self.config.heuristic_confidence,
            precision: self.config.heuristic_precision,
            status: GEOCODED_STATUS.to_string(),
            original_snippet: query.to_string(),
            reasoning: TOP_CANDIDATE_REASONING.to_string(),
        }
    }
}

#[async_trait]
impl<M, G> LocationProvider for TwoStepProvider<M, G>
where
    M: ChatModel,
    G: Geocoder,
{
    type Error = ExtractorError;

    async fn run(&self, text: &str) -> Result<Vec<LocationRecord>, Self::Error> {
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(length, self.config.max_text_length));
        }

        let response = self
            .model
            .complete(&ChatRequest::new(FALLBACK_PROMPT, text))
            .await
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        let queries: BTreeSet<String> = parse_place_names(&response)?.into_iter().collect();
        debug!("Model listed {} distinct place names", queries.len());

        let mut seen: HashSet<CoordinateKey> = HashSet::new();
        let mut records = Vec::new();

        for query in &queries {
            let hit = match self.geocoder.geocode(query).await {
                Ok(Some(hit)) => hit,
                Ok(None) => {
                    debug!("No geocoding result for '{}'", query);
                    continue;
                }
                Err(e) => {
                    warn!("Geocoding '{}' failed: {}", query, e);
                    continue;
                }
            };

            let record = self.to_record(query, hit);
            if let Err(e) = record.validate() {
                warn!("Discarding geocoder result for '{}': {}", query, e);
                continue;
            }

            if !seen.insert(record.coordinate_key(self.config.coordinate_decimals)) {
                debug!("Dropping duplicate coordinates for '{}'", query);
                continue;
            }

            records.push(record);
        }

        info!(
            "Geocoded {} of {} place names",
            records.len(),
            queries.len()
        );
        Ok(records)
    }
}
