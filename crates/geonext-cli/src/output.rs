//! Output formatting for the CLI.

use colored::*;
use geonext_pipeline::RunMetrics;
use std::path::Path;

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format the outcome of a completed run.
    pub fn run_summary(&self, metrics: &RunMetrics, output: &Path) -> String {
        let mut lines = Vec::new();

        if metrics.processed == 0 {
            lines.push(self.info(&format!(
                "Nothing to do: {} already holds {} entries",
                output.display(),
                metrics.total
            )));
        } else {
            lines.push(self.success(&format!(
                "Wrote {} entries to {}",
                metrics.position(),
                output.display()
            )));
        }

        if metrics.failed > 0 {
            lines.push(self.warning(&format!(
                "{} item(s) recorded as errors",
                metrics.failed
            )));
        }

        lines.push(metrics.summary());
        lines.join("\n")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
