//! Configuration from the process environment.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the working directory. Command-line flags override them.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use geonext_pipeline::RunnerConfig;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which provider variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Tool-calling provider backed by OpenAI
    #[default]
    OpenAi,
    /// Two-step provider backed by Mistral and the MCP geocoder
    Mistral,
}

impl FromStr for ProviderKind {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "mistral" => Ok(ProviderKind::Mistral),
            other => Err(CliError::Config(format!(
                "Unknown provider '{}' (expected openai or mistral)",
                other
            ))),
        }
    }
}

impl ProviderKind {
    /// Environment variable holding this provider's API key.
    pub fn api_key_variable(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Mistral => "MISTRAL_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Mistral => write!(f, "mistral"),
        }
    }
}

/// Connection settings for one chat model vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    /// API key, if set
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// API base URL
    pub base_url: String,
}

impl ModelSettings {
    /// Return the API key or a configuration error naming `variable`.
    pub fn require_api_key(&self, variable: &str) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| CliError::Config(format!("{} is not set", variable)))
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Provider variant
    pub provider: ProviderKind,
    /// MCP geocoding server URL
    pub mcp_url: String,
    /// Label the MCP server is attached under
    pub mcp_label: String,
    /// Flush interval for the results file
    pub flush_every: usize,
    /// Halt on the first provider failure
    pub stop_on_error: bool,
    /// Log level directive
    pub log_level: String,
    /// Log file path
    pub log_file: PathBuf,
    /// Attempts per model call
    pub llm_retries: u32,
    /// Directory raw OpenAI replies are archived to, if any
    pub responses_dir: Option<PathBuf>,
    /// OpenAI settings
    pub openai: ModelSettings,
    /// Mistral settings
    pub mistral: ModelSettings,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first when present;
    /// variables already set in the environment take precedence.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let provider = match get("GEONEXT_PROVIDER") {
            Some(value) => value.parse()?,
            None => ProviderKind::default(),
        };

        let flush_every = match get("GEONEXT_FLUSH") {
            Some(value) => parse_number("GEONEXT_FLUSH", &value)?,
            None => 1,
        };

        let stop_on_error = match get("STOP_ON_ERROR") {
            Some(value) => parse_flag("STOP_ON_ERROR", &value)?,
            None => true,
        };

        let llm_retries = match get("GEONEXT_LLM_RETRIES") {
            Some(value) => parse_number("GEONEXT_LLM_RETRIES", &value)?,
            None => geonext_llm::DEFAULT_MAX_ATTEMPTS,
        };

        Ok(Self {
            provider,
            mcp_url: get_or("MCP_URL", geonext_mcp::DEFAULT_MCP_URL),
            mcp_label: get_or("MCP_LABEL", "geonext"),
            flush_every,
            stop_on_error,
            log_level: get_or("LOG_LEVEL", "INFO"),
            log_file: PathBuf::from(get_or("LOG_FILE", "geonext.log")),
            llm_retries,
            responses_dir: get("GEONEXT_RESPONSES_DIR").map(PathBuf::from),
            openai: ModelSettings {
                api_key: get("OPENAI_API_KEY"),
                model: get_or("OPENAI_MODEL", geonext_llm::openai::DEFAULT_MODEL),
                base_url: get_or("OPENAI_BASE_URL", geonext_llm::openai::DEFAULT_ENDPOINT),
            },
            mistral: ModelSettings {
                api_key: get("MISTRAL_API_KEY"),
                model: get_or("MISTRAL_MODEL", geonext_llm::mistral::DEFAULT_MODEL),
                base_url: get_or("MISTRAL_BASE_URL", geonext_llm::mistral::DEFAULT_ENDPOINT),
            },
        })
    }

    /// Apply command-line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(provider) = cli.provider {
            self.provider = provider.into();
        }
        if let Some(flush_every) = cli.flush_every {
            self.flush_every = flush_every;
        }
        if cli.keep_going {
            self.stop_on_error = false;
        }
    }

    /// Settings for the selected provider's chat model.
    pub fn model_settings(&self) -> &ModelSettings {
        match self.provider {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Mistral => &self.mistral,
        }
    }

    /// Batch runner configuration.
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig::default()
            .with_flush_every(self.flush_every)
            .with_stop_on_error(self.stop_on_error)
    }
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| {
            CliError::Config(format!(
                "{} must be a non-negative integer, got '{}'",
                name, value
            ))
        })
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CliError::Config(format!(
            "{} must be 0/1 or true/false, got '{}'",
            name, value
        ))),
    }
}
