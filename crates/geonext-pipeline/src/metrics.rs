//! Metrics collected during a batch run

use std::time::Duration;

/// Counters for one batch run
///
/// `processed` counts items handled by this run only; items restored from
/// the results file are reflected in `start_index`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
    /// Index the run resumed from
    pub start_index: usize,

    /// Number of input items
    pub total: usize,

    /// Items handled in this run
    pub processed: usize,

    /// Items whose provider call succeeded
    pub succeeded: usize,

    /// Items whose provider call failed
    pub failed: usize,

    /// Location records produced in this run
    pub locations: usize,

    /// Times the results file was rewritten
    pub flushes: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunMetrics {
    /// Create metrics for a run over `total` items resuming at `start_index`
    pub fn new(start_index: usize, total: usize) -> Self {
        Self {
            start_index,
            total,
            ..Self::default()
        }
    }

    /// Record an item that produced `locations` records
    pub fn record_success(&mut self, locations: usize) {
        self.processed += 1;
        self.succeeded += 1;
        self.locations += locations;
    }

    /// Record an item whose provider call failed
    pub fn record_failure(&mut self) {
        self.processed += 1;
        self.failed += 1;
    }

    /// Record a rewrite of the results file
    pub fn record_flush(&mut self) {
        self.flushes += 1;
    }

    /// Index of the next item to process
    pub fn position(&self) -> usize {
        self.start_index + self.processed
    }

    /// Whether every input item now has an entry
    pub fn is_complete(&self) -> bool {
        self.position() >= self.total
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Run Summary".to_string(),
            "===========".to_string(),
            format!("Items: {}/{}", self.position(), self.total),
        ];

        if self.start_index > 0 {
            lines.push(format!("Resumed at: {}", self.start_index));
        }

        lines.push(format!(
            "Processed: {} ({} succeeded, {} failed)",
            self.processed, self.succeeded, self.failed
        ));
        lines.push(format!("Locations found: {}", self.locations));
        lines.push(format!("Flushes: {}", self.flushes));
        lines.push(format!("Elapsed: {:.1}s", self.elapsed.as_secs_f64()));

        lines.join("\n")
    }
}
