//! Loading input items and flattening them to text

use crate::error::PipelineError;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load the input file as a list of items
///
/// The file must contain a JSON array; its elements can be anything.
pub fn load_items(path: &Path) -> Result<Vec<Value>, PipelineError> {
    let content = fs::read_to_string(path).map_err(|e| {
        PipelineError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
    })?;

    parse_items(&content)
        .map_err(|msg| PipelineError::InvalidInput(format!("{}: {}", path.display(), msg)))
}

fn parse_items(content: &str) -> Result<Vec<Value>, String> {
    match serde_json::from_str(content) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err("root JSON value must be an array".to_string()),
        Err(e) => Err(format!("malformed JSON: {}", e)),
    }
}

/// Flatten an item into the text handed to a provider
///
/// Nested values are pretty-printed with two-space indentation; non-ASCII
/// characters are kept as-is.
pub fn item_to_text(item: &Value) -> Result<String, PipelineError> {
    Ok(serde_json::to_string_pretty(item)?)
}
