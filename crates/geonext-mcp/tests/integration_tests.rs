//! Integration tests for the MCP geocoding client
//!
//! These tests verify the tool call envelope and the client's handling of
//! realistic server replies.

use geonext_domain::Geocoder;
use geonext_mcp::protocol::{ToolCallRequest, GEOCODE_TOOL};
use geonext_mcp::{McpError, McpGeocoder};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_request_envelope() {
    let request = ToolCallRequest::geocode("Kharkiv, Ukraine", 3);
    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(
        value,
        json!({
            "tool_name": GEOCODE_TOOL,
            "args": {"location": "Kharkiv, Ukraine", "max_results": 3}
        })
    );
}

#[tokio::test]
async fn test_first_of_several_candidates_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp/call"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {"latitude": 49.9935, "longitude": 36.2304, "display_name": "Харків, Україна"},
                {"latitude": 49.98, "longitude": 36.25, "display_name": "Kharkiv Oblast"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = McpGeocoder::new(&format!("{}/mcp", server.uri())).unwrap();
    let hit = geocoder.geocode("Kharkiv").await.unwrap().unwrap();

    assert_eq!(hit.latitude, 49.9935);
    assert_eq!(hit.address.as_deref(), Some("Харків, Україна"));
}

#[tokio::test]
async fn test_non_json_body_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let geocoder = McpGeocoder::new(&server.uri()).unwrap();
    let result = geocoder.geocode("Lviv").await;
    assert!(matches!(
        result,
        Err(McpError::Communication(_)) | Err(McpError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_unreachable_server() {
    let geocoder = McpGeocoder::new("http://127.0.0.1:9/mcp/").unwrap();
    let result = geocoder.geocode("Odense").await;
    assert!(matches!(result, Err(McpError::Communication(_))));
}
