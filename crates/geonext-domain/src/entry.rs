//! Result entry module - one slot of the results file per input item

use crate::LocationRecord;
use serde::{Deserialize, Serialize};

/// Outcome of processing one input item
///
/// Serialized untagged: a success is a bare JSON array of records, a
/// failure is `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultEntry {
    /// All places found in the item (possibly none)
    Locations(Vec<LocationRecord>),

    /// Placeholder recorded when the provider failed on the item
    Error {
        /// Provider error message
        error: String,
    },
}

impl ResultEntry {
    /// Create an error placeholder
    pub fn error(message: impl Into<String>) -> Self {
        ResultEntry::Error {
            error: message.into(),
        }
    }

    /// Whether this entry is an error placeholder
    pub fn is_error(&self) -> bool {
        matches!(self, ResultEntry::Error { .. })
    }

    /// Number of locations carried by the entry
    pub fn location_count(&self) -> usize {
        match self {
            ResultEntry::Locations(records) => records.len(),
            ResultEntry::Error { .. } => 0,
        }
    }
}

impl From<Vec<LocationRecord>> for ResultEntry {
    fn from(records: Vec<LocationRecord>) -> Self {
        ResultEntry::Locations(records)
    }
}
