//! GeoNeXt CLI - batch location extraction and geocoding.

use clap::Parser;
use geonext_cli::commands;
use geonext_cli::logging;
use geonext_cli::{AppConfig, Cli, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> geonext_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Environment (and .env) first, then flags on top
    let mut config = AppConfig::from_env()?;
    config.apply_cli(&cli);

    let color_enabled = !cli.no_color;
    logging::init_logging(&config.log_level, &config.log_file, color_enabled)?;

    let formatter = Formatter::new(color_enabled);
    eprintln!(
        "{}",
        formatter.info(&format!(
            "Provider: {} | {} -> {}",
            config.provider,
            cli.input.display(),
            cli.output.display()
        ))
    );

    let metrics = commands::execute_run(&cli, &config).await?;
    println!("{}", formatter.run_summary(&metrics, &cli.output));

    Ok(())
}
