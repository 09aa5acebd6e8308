//! Run command implementation.

use crate::cli::Cli;
use crate::config::{AppConfig, ProviderKind};
use crate::error::{CliError, Result};
use geonext_domain::{LocationProvider, McpTool};
use geonext_extractor::{ExtractorConfig, ToolCallingProvider, TwoStepProvider};
use geonext_llm::{MistralClient, OpenAiClient};
use geonext_mcp::McpGeocoder;
use geonext_pipeline::{BatchRunner, RunMetrics, RunnerConfig};
use std::path::Path;
use tracing::info;

/// Execute a batch run with the provider selected in `config`.
pub async fn execute_run(cli: &Cli, config: &AppConfig) -> Result<RunMetrics> {
    let runner_config = config.runner_config();
    let extractor_config = ExtractorConfig::default();
    extractor_config.validate().map_err(CliError::Config)?;

    let settings = config.model_settings();
    let api_key = settings.require_api_key(config.provider.api_key_variable())?;

    match config.provider {
        ProviderKind::OpenAi => {
            let mut model = OpenAiClient::new(api_key, &settings.model)?
                .with_endpoint(&settings.base_url)
                .with_max_attempts(config.llm_retries);
            if let Some(dir) = &config.responses_dir {
                info!("Archiving raw responses to {}", dir.display());
                model = model.with_responses_dir(dir);
            }
            let tool = McpTool::new(&config.mcp_url, &config.mcp_label);

            info!(
                "Using tool-calling provider: {} with MCP server {}",
                settings.model, config.mcp_url
            );
            let provider = ToolCallingProvider::new(model, tool, extractor_config);
            run_with_provider(provider, runner_config, &cli.input, &cli.output).await
        }
        ProviderKind::Mistral => {
            let model = MistralClient::new(api_key, &settings.model)?
                .with_endpoint(&settings.base_url)
                .with_max_attempts(config.llm_retries);
            let geocoder = McpGeocoder::new(&config.mcp_url)?;

            info!(
                "Using two-step provider: {} with geocoder at {}",
                settings.model, config.mcp_url
            );
            let provider = TwoStepProvider::new(model, geocoder, extractor_config);
            run_with_provider(provider, runner_config, &cli.input, &cli.output).await
        }
    }
}

/// Run `input` into `output` with an already constructed provider.
pub async fn run_with_provider<P>(
    provider: P,
    config: RunnerConfig,
    input: &Path,
    output: &Path,
) -> Result<RunMetrics>
where
    P: LocationProvider,
{
    let runner = BatchRunner::new(provider, config)?;
    Ok(runner.run_file(input, output).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use geonext_llm::MockChatModel;
    use geonext_pipeline::PipelineError;
    use std::fs;
    use tempfile::TempDir;

    const PARIS_RESPONSE: &str = r#"{"locations": [{
        "name": "Paris",
        "address": "Paris, France",
        "latitude": 48.8566,
        "longitude": 2.3522,
        "confidence": 9,
        "precision": 6,
        "status": "geocoded",
        "original_snippet": "Paris is nice",
        "reasoning": "capital"
    }]}"#;

    fn tool() -> McpTool {
        McpTool::new("http://localhost:8000/mcp/", "geonext")
    }

    #[tokio::test]
    async fn test_run_with_mock_model() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        fs::write(&input, r#"["Paris is nice", "Paris again"]"#).unwrap();

        let model = MockChatModel::new(PARIS_RESPONSE);
        let provider = ToolCallingProvider::new(model, tool(), ExtractorConfig::default());
        let metrics = run_with_provider(provider, RunnerConfig::default(), &input, &output)
            .await
            .unwrap();

        assert_eq!(metrics.locations, 2);
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0][0]["name"], "Paris");
    }

    #[tokio::test]
    async fn test_schema_violation_halts_run() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        fs::write(&input, r#"["a", "b"]"#).unwrap();

        let mut model = MockChatModel::new(PARIS_RESPONSE);
        model.add_response("\"b\"", "not json at all");
        let provider = ToolCallingProvider::new(model, tool(), ExtractorConfig::default());

        let result = run_with_provider(provider, RunnerConfig::default(), &input, &output).await;
        assert!(matches!(
            result,
            Err(CliError::Pipeline(PipelineError::Provider { index: 1, .. }))
        ));
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let config = AppConfig::from_lookup(|key| match key {
            "GEONEXT_PROVIDER" => Some("mistral".to_string()),
            _ => None,
        })
        .unwrap();
        let cli = Cli::try_parse_from(["geonext", "-i", "in.json", "-o", "out.json"]).unwrap();

        match execute_run(&cli, &config).await {
            Err(CliError::Config(msg)) => assert!(msg.contains("MISTRAL_API_KEY")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            _ => None,
        })
        .unwrap();
        let input = dir.path().join("absent.json");
        let output = dir.path().join("out.json");
        let cli = Cli::try_parse_from([
            "geonext",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();

        let result = execute_run(&cli, &config).await;
        assert!(matches!(
            result,
            Err(CliError::Pipeline(PipelineError::InvalidInput(_)))
        ));
        assert!(!output.exists());
    }
}
