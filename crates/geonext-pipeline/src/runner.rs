//! Sequential, resumable batch runner

use crate::input::{item_to_text, load_items};
use crate::{PipelineError, ResultsFile, RunMetrics, RunnerConfig};
use geonext_domain::{LocationProvider, ResultEntry};
use serde_json::Value;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

/// Runs a provider over every input item and keeps the results file current
///
/// Items are processed one at a time, in order. The results file is the
/// checkpoint: rerunning against the same output picks up where the last
/// run stopped.
///
/// # Examples
///
/// ```no_run
/// use geonext_pipeline::{BatchRunner, RunnerConfig};
/// # use geonext_domain::LocationProvider;
/// # use std::path::Path;
///
/// # async fn example<P: LocationProvider>(provider: P) -> Result<(), Box<dyn std::error::Error>> {
/// let runner = BatchRunner::new(provider, RunnerConfig::default())?;
/// let metrics = runner
///     .run_file(Path::new("articles.json"), Path::new("locations.json"))
///     .await?;
/// println!("{}", metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct BatchRunner<P> {
    provider: P,
    config: RunnerConfig,
}

impl<P> BatchRunner<P>
where
    P: LocationProvider,
{
    /// Create a runner, rejecting invalid configuration
    pub fn new(provider: P, config: RunnerConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        Ok(Self { provider, config })
    }

    /// Access the provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Access the configuration
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Load items from `input` and run them into `output`
    pub async fn run_file(&self, input: &Path, output: &Path) -> Result<RunMetrics, PipelineError> {
        let items = load_items(input)?;
        info!("Loaded {} items from {}", items.len(), input.display());
        self.run(&items, output).await
    }

    /// Run every item not yet recorded in `output`
    ///
    /// # Errors
    ///
    /// With `stop_on_error`, the first provider failure flushes the entries
    /// gathered so far and returns [`PipelineError::Provider`]; the failing
    /// item gets no entry. Also fails if `output` already holds more entries
    /// than there are items.
    pub async fn run(&self, items: &[Value], output: &Path) -> Result<RunMetrics, PipelineError> {
        let started = Instant::now();
        let mut results = ResultsFile::open(output)?;
        let start = results.len();
        let total = items.len();

        if start > total {
            return Err(PipelineError::ResumeMismatch {
                existing: start,
                total,
            });
        }

        let mut metrics = RunMetrics::new(start, total);
        info!("Resuming at index {} / {}", start, total);

        for (index, item) in items.iter().enumerate().skip(start) {
            let text = item_to_text(item)?;
            debug!("Item {}: {} chars", index, text.len());

            let entry = match self.provider.run(&text).await {
                Ok(records) => ResultEntry::from(records),
                Err(e) => {
                    error!("Provider failed on index {}: {}", index, e);

                    if self.config.stop_on_error {
                        metrics.record_failure();
                        if results.is_dirty() {
                            results.flush()?;
                            metrics.record_flush();
                        }
                        info!("Halted at index {}; {} entries saved", index, results.len());
                        return Err(PipelineError::Provider {
                            index,
                            message: e.to_string(),
                        });
                    }

                    ResultEntry::error(e.to_string())
                }
            };

            if entry.is_error() {
                metrics.record_failure();
            } else {
                metrics.record_success(entry.location_count());
            }
            results.push(serde_json::to_value(&entry)?);

            info!("Processed {} / {}", metrics.position(), total);

            if metrics.processed % self.config.flush_every == 0 {
                results.flush()?;
                metrics.record_flush();
            }
        }

        if results.is_dirty() {
            results.flush()?;
            metrics.record_flush();
        }
        metrics.elapsed = started.elapsed();

        info!(
            "Run finished: {} processed, {} failed, {} locations",
            metrics.processed, metrics.failed, metrics.locations
        );
        Ok(metrics)
    }
}
