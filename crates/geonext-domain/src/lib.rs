//! GeoNeXt Domain Layer
//!
//! Core data model and trait interfaces shared by every other crate.
//! Network clients, prompts and the batch loop live elsewhere; this crate
//! only knows what a located place looks like and which capabilities the
//! pipeline needs from the outside world.
//!
//! ## Key Concepts
//!
//! - **Location Record**: one geocoded place extracted from a document
//! - **Result Entry**: the outcome for one input item (records or an error)
//! - **Coordinate Key**: rounded coordinates used for deduplication
//! - **Providers**: `LocationProvider`, `ChatModel` and `Geocoder` seams

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chat;
pub mod entry;
pub mod geocode;
pub mod location;
pub mod traits;

// Re-exports for convenience
pub use chat::{ChatRequest, McpTool, ResponseSchema};
pub use entry::ResultEntry;
pub use geocode::GeocodeHit;
pub use location::{CoordinateKey, LocationRecord, DEFAULT_COORDINATE_DECIMALS};
pub use traits::{ChatModel, Geocoder, LocationProvider};
