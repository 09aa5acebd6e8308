//! GeoNeXt Extractor
//!
//! Turns the text of one input item into geocoded location records.
//!
//! # Overview
//!
//! Two interchangeable providers implement
//! [`LocationProvider`](geonext_domain::LocationProvider):
//!
//! - [`ToolCallingProvider`]: a tool-capable model reads the text, calls the
//!   MCP geocoding server itself and answers with schema-conforming records.
//! - [`TwoStepProvider`]: a plain model lists place names, then each name is
//!   geocoded directly and the top candidate is kept.
//!
//! # Architecture
//!
//! ```text
//! Text → Provider → ChatModel (+ MCP tool) → Parser → LocationRecords
//! Text → Provider → ChatModel → names → Geocoder → dedup → LocationRecords
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use geonext_domain::{LocationProvider, McpTool};
//! use geonext_extractor::{ExtractorConfig, ToolCallingProvider};
//! use geonext_llm::OpenAiClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let model = OpenAiClient::new("sk-...", "gpt-4o-mini")?;
//! let tool = McpTool::new("http://localhost:8000/mcp/", "geonext");
//! let provider = ToolCallingProvider::new(model, tool, ExtractorConfig::default());
//!
//! let records = provider.run("Shelling was reported near Kharkiv.").await?;
//! println!("Found {} locations", records.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod parser;
mod prompt;
mod tool_calling;
mod two_step;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use parser::{parse_location_records, parse_place_names};
pub use prompt::{
    location_record_schema, location_response_schema, FALLBACK_PROMPT, SCHEMA_NAME,
    SYSTEM_PROMPT,
};
pub use tool_calling::ToolCallingProvider;
pub use two_step::{TwoStepProvider, GEOCODED_STATUS, TOP_CANDIDATE_REASONING};
