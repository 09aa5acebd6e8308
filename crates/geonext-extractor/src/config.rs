//! Configuration for the location providers

use geonext_domain::location::{MAX_SCORE, MIN_SCORE};
use geonext_domain::DEFAULT_COORDINATE_DECIMALS;
use serde::{Deserialize, Serialize};

/// Configuration shared by both provider variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Decimals kept when comparing coordinates for duplicates
    pub coordinate_decimals: u32,

    /// Confidence assigned to two-step results (top-1 geocoder pick)
    pub heuristic_confidence: u8,

    /// Precision assigned to two-step results
    pub heuristic_precision: u8,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.coordinate_decimals > 8 {
            return Err("coordinate_decimals cannot exceed 8".to_string());
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.heuristic_confidence) {
            return Err(format!(
                "heuristic_confidence must be in [{}, {}]",
                MIN_SCORE, MAX_SCORE
            ));
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.heuristic_precision) {
            return Err(format!(
                "heuristic_precision must be in [{}, {}]",
                MIN_SCORE, MAX_SCORE
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            coordinate_decimals: DEFAULT_COORDINATE_DECIMALS,
            heuristic_confidence: 7,
            heuristic_precision: 5,
        }
    }
}
