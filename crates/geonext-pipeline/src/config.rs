//! Configuration for batch runs
//!
//! Controls how often results are flushed and what happens when an item fails.

use serde::{Deserialize, Serialize};

/// Configuration for the batch runner
///
/// # Examples
///
/// ```
/// use geonext_pipeline::RunnerConfig;
///
/// // Default: flush after every item, halt on the first failure
/// let config = RunnerConfig::default();
/// assert_eq!(config.flush_every, 1);
/// assert!(config.stop_on_error);
///
/// // Record failures as error entries and keep going
/// let config = RunnerConfig::keep_going();
/// assert!(!config.stop_on_error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Rewrite the results file after this many processed items
    /// Default: 1 (after every item)
    pub flush_every: usize,

    /// Halt the run on the first provider failure
    /// Default: true
    #[serde(default = "default_stop_on_error")]
    pub stop_on_error: bool,
}

fn default_stop_on_error() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            flush_every: 1,
            stop_on_error: true,
        }
    }
}

impl RunnerConfig {
    /// Record failures as `{"error": ...}` entries instead of halting
    pub fn keep_going() -> Self {
        Self {
            stop_on_error: false,
            ..Self::default()
        }
    }

    /// Set the flush interval
    pub fn with_flush_every(mut self, flush_every: usize) -> Self {
        self.flush_every = flush_every;
        self
    }

    /// Set the failure policy
    pub fn with_stop_on_error(mut self, stop_on_error: bool) -> Self {
        self.stop_on_error = stop_on_error;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.flush_every == 0 {
            return Err("flush_every must be at least 1".to_string());
        }
        Ok(())
    }
}
