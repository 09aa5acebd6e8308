//! Parse model output into location records or place names
//!
//! Parsing is strict: one malformed element fails the whole response.

use crate::error::ExtractorError;
use geonext_domain::LocationRecord;
use serde_json::Value;

/// Parse a tool-calling model response into validated location records
///
/// Accepts a bare JSON array or an object with a `locations` array.
pub fn parse_location_records(response: &str) -> Result<Vec<LocationRecord>, ExtractorError> {
    let json = parse_json(response)?;

    let items = match json {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("locations") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ExtractorError::InvalidFormat(
                    "'locations' is not an array".to_string(),
                ))
            }
            None => {
                return Err(ExtractorError::InvalidFormat(
                    "Expected JSON array or object with 'locations'".to_string(),
                ))
            }
        },
        _ => {
            return Err(ExtractorError::InvalidFormat(
                "Expected JSON array or object with 'locations'".to_string(),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let record: LocationRecord = serde_json::from_value(item)
                .map_err(|e| ExtractorError::InvalidFormat(format!("location {}: {}", idx, e)))?;
            record
                .validate()
                .map_err(|e| ExtractorError::InvalidFormat(format!("location {}: {}", idx, e)))?;
            Ok(record)
        })
        .collect()
}

/// Parse a fallback model response into place-name queries
///
/// Blank names are dropped; anything other than strings is an error.
pub fn parse_place_names(response: &str) -> Result<Vec<String>, ExtractorError> {
    let json = parse_json(response)?;

    let items = json
        .as_array()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON array of strings".to_string()))?;

    let mut names = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let name = item.as_str().ok_or_else(|| {
            ExtractorError::InvalidFormat(format!("place name {} is not a string", idx))
        })?;
        let name = name.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

fn parse_json(response: &str) -> Result<Value, ExtractorError> {
    let json_str = extract_json(response)?;
    serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::InvalidFormat(format!("JSON parse error: {}", e)))
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if !trimmed.starts_with("```") {
        return Ok(trimmed.to_string());
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() < 2 {
        return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
    }

    // Skip the opening fence line and, if present, the closing one
    let end = if lines[lines.len() - 1].trim() == "```" {
        lines.len() - 1
    } else {
        lines.len()
    };
    Ok(lines[1..end].join("\n"))
}
