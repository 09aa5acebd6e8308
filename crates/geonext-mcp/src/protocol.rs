//! Tool call envelope spoken by the geocoding server's `/call` route

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the geocoding tool exposed by the server
pub const GEOCODE_TOOL: &str = "geocode_location";

/// Tool call request
#[derive(Debug, Serialize)]
pub struct ToolCallRequest<'a> {
    /// Tool to invoke
    pub tool_name: &'a str,
    /// Tool arguments
    pub args: GeocodeArgs<'a>,
}

/// Arguments of the `geocode_location` tool
#[derive(Debug, Serialize)]
pub struct GeocodeArgs<'a> {
    /// Free-text place query
    pub location: &'a str,
    /// Maximum number of candidates to return
    pub max_results: usize,
}

/// Tool call response
#[derive(Debug, Deserialize)]
pub struct ToolCallResponse {
    /// Candidates, best first; `null` is treated as empty
    #[serde(default)]
    pub result: Option<Vec<Value>>,
    /// Tool-level failure message
    #[serde(default)]
    pub error: Option<String>,
}

impl<'a> ToolCallRequest<'a> {
    /// Build a geocode call for a single query
    pub fn geocode(location: &'a str, max_results: usize) -> Self {
        Self {
            tool_name: GEOCODE_TOOL,
            args: GeocodeArgs {
                location,
                max_results,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geocode_request_shape() {
        let request = ToolCallRequest::geocode("Odense, Denmark", 1);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "tool_name": "geocode_location",
                "args": {"location": "Odense, Denmark", "max_results": 1}
            })
        );
    }

    #[test]
    fn test_response_null_result() {
        let response: ToolCallResponse = serde_json::from_str(r#"{"result": null}"#).unwrap();
        assert!(response.result.is_none());
        assert!(response.error.is_none());
    }
}
