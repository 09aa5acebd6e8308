//! Geocoder candidate returned by the geocoding service

use serde::{Deserialize, Deserializer, Serialize};

/// Top candidate for a geocoding query
///
/// Coordinates are accepted either as JSON numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeHit {
    /// Latitude in decimal degrees
    #[serde(deserialize_with = "number_or_string")]
    pub latitude: f64,

    /// Longitude in decimal degrees
    #[serde(deserialize_with = "number_or_string")]
    pub longitude: f64,

    /// Formatted address of the candidate
    #[serde(default, alias = "display_name", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Canonical name of the candidate, if the service reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl GeocodeHit {
    /// Create a hit with coordinates only
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            address: None,
            name: None,
        }
    }

    /// Attach a formatted address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid coordinate '{}': {}", s, e))),
    }
}
