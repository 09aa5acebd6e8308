//! Prompts and the location schema handed to the models

use serde_json::{json, Value};

/// Name under which the response schema is registered with the model
pub const SCHEMA_NAME: &str = "geonext_locations";

/// Instructions for tool-capable models that geocode through MCP themselves
pub const SYSTEM_PROMPT: &str = "\
You are GeoNeXt, an expert location-resolution agent.
Goal: read the user text and output ONLY a JSON object that strictly conforms \
to the geonext_locations response schema. No markdown, no commentary.

Extraction
- Identify every UNIQUE real-world location mention (city, town, POI, \
street address, landmark, region, country).
- Ignore non-geographic entities and fictional places.
- Deduplicate: nearby locations are fine, the exact same location twice is not.

Geocoding (one location at a time)
- Use the provided MCP geocoding tool.
- Start with the raw mention. If context clearly points to a region or \
country, append it on the first attempt (e.g. 'Odense' -> 'Odense, Denmark').
- If a call is ambiguous or mismatched, refine the query (add region, state \
or country, try alternate spellings) and retry, at most 2 extra tries per location.
- Reason over the returned candidates and keep the one (or none) that best \
fits the surrounding text.

Output rules
- Include only locations that were geocoded successfully.
- If no places are found, return an empty locations list.
- Return the JSON structure with no extra keys and no explanatory prose.

Think internally; never reveal chain-of-thought. \
Do not wrap the JSON in triple back-ticks.";

/// Instructions for models without tool access: list place names only
pub const FALLBACK_PROMPT: &str = "\
You are GeoNeXt-Lite. Extract all distinct locations from the text. \
Return a JSON array of strings only. \
Each string must already include the country/state if obvious. \
Do NOT geocode; do NOT add anything else.";

/// Rubric for the `confidence` field
const CONFIDENCE_RUBRIC: &str = "Use 10 only when the text explicitly and \
unambiguously names the exact street, city and country and the geocoder result \
matches with zero ambiguity. Use 7-9 when fairly sure, 4-6 when uncertain and \
1-3 as a last-resort guess.";

/// Rubric for the `precision` field
const PRECISION_RUBRIC: &str = "How specific the mention itself is, not the \
geocoder result. 10 = street number present ('1600 Amphitheatre Pkwy'). \
7-9 = street name without number ('Amphitheatre Pkwy'). 5-6 = named \
neighbourhood or POI ('Eiffel Tower'). 3-4 = city or town only ('Toronto'). \
1-2 = region, state or country only ('Ontario', 'Canada').";

/// JSON Schema for a single location record
pub fn location_record_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {
                "type": "string",
                "description": "The location mention exactly as it appears in the text, case preserved."
            },
            "address": {
                "type": "string",
                "description": "Formatted address returned by the geocoder."
            },
            "latitude":  {"type": "number"},
            "longitude": {"type": "number"},
            "confidence": {
                "type": "integer",
                "minimum": 1,
                "maximum": 10,
                "description": CONFIDENCE_RUBRIC
            },
            "precision": {
                "type": "integer",
                "minimum": 1,
                "maximum": 10,
                "description": PRECISION_RUBRIC
            },
            "status": {
                "type": "string",
                "enum": ["matched", "guessed"],
                "description": "matched = high-fidelity match; guessed = best effort with some ambiguity left."
            },
            "original_snippet": {
                "type": "string",
                "description": "Short excerpt (at most 80 chars) of the text around the mention."
            },
            "reasoning": {
                "type": "string",
                "description": "One sentence explaining the choice of location."
            }
        },
        "required": [
            "name", "address", "latitude", "longitude", "confidence",
            "precision", "status", "original_snippet", "reasoning"
        ],
        "additionalProperties": false
    })
}

/// Response schema for the tool-calling model
///
/// Structured output formats need an object at the root, so the record
/// array is wrapped as `{"locations": [...]}`.
pub fn location_response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "locations": {
                "type": "array",
                "description": "One element per unique real-world location in the text. Empty if none found.",
                "items": location_record_schema()
            }
        },
        "required": ["locations"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_schema_requires_all_fields() {
        let schema = location_record_schema();
        let required = schema["required"].as_array().unwrap();
        let properties = schema["properties"].as_object().unwrap();

        assert_eq!(required.len(), properties.len());
        for field in required {
            assert!(properties.contains_key(field.as_str().unwrap()));
        }
        assert_eq!(schema["additionalProperties"], false);
    }

    #[test]
    fn test_score_bounds_in_schema() {
        let schema = location_record_schema();
        assert_eq!(schema["properties"]["confidence"]["minimum"], 1);
        assert_eq!(schema["properties"]["precision"]["maximum"], 10);
    }

    #[test]
    fn test_response_schema_wraps_array() {
        let schema = location_response_schema();
        assert_eq!(schema["properties"]["locations"]["type"], "array");
        assert_eq!(
            schema["properties"]["locations"]["items"],
            location_record_schema()
        );
    }

    #[test]
    fn test_status_enum() {
        let schema = location_record_schema();
        assert_eq!(
            schema["properties"]["status"]["enum"],
            json!(["matched", "guessed"])
        );
    }

    #[test]
    fn test_rubric_descriptions() {
        let properties = &location_record_schema()["properties"];

        let confidence = properties["confidence"]["description"].as_str().unwrap();
        assert!(confidence.contains("Use 10 only when"));
        assert!(confidence.contains("7-9"));
        assert!(confidence.contains("4-6"));
        assert!(confidence.contains("1-3"));

        let precision = properties["precision"]["description"].as_str().unwrap();
        assert!(precision.contains("10 = street number"));
        assert!(precision.contains("1-2 = region, state or country"));

        let snippet = properties["original_snippet"]["description"].as_str().unwrap();
        assert!(snippet.contains("80 chars"));
    }

    #[test]
    fn test_prompts_mention_contract() {
        assert!(SYSTEM_PROMPT.contains("one location at a time"));
        assert!(SYSTEM_PROMPT.contains("2 extra tries"));
        assert!(SYSTEM_PROMPT.contains("fictional places"));
        assert!(SYSTEM_PROMPT.contains("never reveal chain-of-thought"));
        assert!(SYSTEM_PROMPT.contains("triple back-ticks"));
        assert!(SYSTEM_PROMPT.contains(SCHEMA_NAME));
        assert!(FALLBACK_PROMPT.contains("JSON array of strings"));
    }
}
