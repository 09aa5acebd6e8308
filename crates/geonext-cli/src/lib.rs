//! GeoNeXt CLI library.
//!
//! This library provides the core functionality for the `geonext` command-line
//! interface, including environment configuration, logging setup, provider
//! selection and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

pub use cli::{Cli, CliProvider};
pub use config::{AppConfig, ModelSettings, ProviderKind};
pub use error::{CliError, Result};
pub use output::Formatter;
