//! Logging setup: human-readable events on stderr and a plain-text log file.

use crate::error::{CliError, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `level` accepts the usual names in any case (`INFO`, `debug`, ...),
/// `WARNING` and `CRITICAL` included, or a full filter directive. The log
/// file is appended to and never colored.
pub fn init_logging(level: &str, log_file: &Path, color: bool) -> Result<()> {
    let filter = EnvFilter::try_new(level_directive(level))
        .map_err(|e| CliError::Config(format!("Invalid LOG_LEVEL '{}': {}", level, e)))?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            CliError::Config(format!("Cannot open log file {}: {}", log_file.display(), e))
        })?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(color);

    let file_layer = fmt::layer().with_writer(Arc::new(file)).with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

/// Translate a level name into a filter directive.
fn level_directive(level: &str) -> String {
    match level.trim().to_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        "" => "info".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(level_directive("INFO"), "info");
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive(""), "info");
    }

    #[test]
    fn test_directives_pass_through() {
        assert_eq!(
            level_directive("geonext_pipeline=debug,info"),
            "geonext_pipeline=debug,info"
        );
    }

    #[test]
    fn test_unwritable_log_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = init_logging("info", &dir.path().join("missing").join("x.log"), false);
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
