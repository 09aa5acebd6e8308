//! CLI argument definitions and parsing.

use crate::config::ProviderKind;
use clap::Parser;
use std::path::PathBuf;

/// GeoNeXt - extract and geocode the places mentioned in a batch of documents.
#[derive(Debug, Parser)]
#[command(name = "geonext")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input file holding a JSON array of items
    #[arg(short, long)]
    pub input: PathBuf,

    /// Results file; an existing one is resumed
    #[arg(short, long)]
    pub output: PathBuf,

    /// Provider variant (default: GEONEXT_PROVIDER, else openai)
    #[arg(short, long, value_enum)]
    pub provider: Option<CliProvider>,

    /// Rewrite the results file after this many items (default: GEONEXT_FLUSH)
    #[arg(long)]
    pub flush_every: Option<usize>,

    /// Record failures as error entries instead of halting
    #[arg(long)]
    pub keep_going: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Provider options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliProvider {
    /// OpenAI with the MCP geocoder attached as a tool
    Openai,
    /// Mistral listing names, geocoded by the client
    Mistral,
}

impl From<CliProvider> for ProviderKind {
    fn from(provider: CliProvider) -> Self {
        match provider {
            CliProvider::Openai => ProviderKind::OpenAi,
            CliProvider::Mistral => ProviderKind::Mistral,
        }
    }
}
