//! GeoNeXt Pipeline
//!
//! Resumable batch runner that feeds input items to a location provider
//! and keeps an index-aligned results file on disk.
//!
//! # Overview
//!
//! The runner is responsible for:
//! - **Resume**: the length of an existing results file is the number of
//!   items already done
//! - **Flattening**: each item is pretty-printed to text for the provider
//! - **Incremental flush**: the results file is rewritten every
//!   `flush_every` items and once more at the end if anything is pending
//! - **Failure policy**: halt on the first failure, or record an
//!   `{"error": ...}` entry and continue
//! - **Metrics**: counters for progress reporting
//!
//! # Results File
//!
//! ```json
//! [
//!   [ { "name": "Paris", "latitude": 48.8566, ... } ],
//!   [],
//!   { "error": "LLM error: rate limit exceeded" }
//! ]
//! ```
//!
//! # Configuration Presets
//!
//! ```
//! use geonext_pipeline::RunnerConfig;
//!
//! // Default: flush after every item, halt on the first failure
//! let config = RunnerConfig::default();
//!
//! // Record failures and keep going, flushing every 10 items
//! let config = RunnerConfig::keep_going().with_flush_every(10);
//! assert!(config.validate().is_ok());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod input;
mod metrics;
mod results;
mod runner;

pub use config::RunnerConfig;
pub use error::PipelineError;
pub use input::{item_to_text, load_items};
pub use metrics::RunMetrics;
pub use results::ResultsFile;
pub use runner::BatchRunner;
