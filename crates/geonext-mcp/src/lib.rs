//! GeoNeXt MCP Geocoding Client
//!
//! Client side of the Model Context Protocol geocoding server. The same
//! server is attached as a remote tool for tool-capable models; this crate
//! calls it directly for models that can only list place names.
//!
//! Provides:
//! - `McpGeocoder` - HTTP client for the `geocode_location` tool
//! - `MockGeocoder` - deterministic table-driven geocoder for tests
//!
//! # Example
//!
//! ```no_run
//! use geonext_mcp::McpGeocoder;
//! use geonext_domain::Geocoder;
//!
//! # async fn example() -> Result<(), geonext_mcp::McpError> {
//! let geocoder = McpGeocoder::new("http://localhost:8000/mcp/")?;
//! if let Some(hit) = geocoder.geocode("Odense, Denmark").await? {
//!     println!("{}, {}", hit.latitude, hit.longitude);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod mock;
pub mod protocol;

pub use client::{McpGeocoder, DEFAULT_MCP_URL};
pub use error::McpError;
pub use mock::MockGeocoder;
