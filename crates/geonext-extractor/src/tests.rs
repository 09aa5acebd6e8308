//! Integration tests for the location providers

#[cfg(test)]
mod tests {
    use crate::{ExtractorConfig, ExtractorError, ToolCallingProvider, TwoStepProvider};
    use geonext_domain::{GeocodeHit, LocationProvider, McpTool};
    use geonext_llm::MockChatModel;
    use geonext_mcp::MockGeocoder;

    fn tool() -> McpTool {
        McpTool::new("http://localhost:8000/mcp/", "geonext")
    }

    #[tokio::test]
    async fn test_tool_calling_full_flow() {
        let model = MockChatModel::new(
            r#"{"locations": [
                {
                    "name": "Paris",
                    "address": "Paris, Île-de-France, France",
                    "latitude": 48.8566,
                    "longitude": 2.3522,
                    "confidence": 9,
                    "precision": 6,
                    "status": "geocoded",
                    "original_snippet": "Paris is nice",
                    "reasoning": "single unambiguous candidate"
                }
            ]}"#,
        );
        let provider = ToolCallingProvider::new(model, tool(), ExtractorConfig::default());

        let records = provider.run("Paris is nice").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Paris");
        assert_eq!(records[0].precision, 6);
        assert_eq!(records[0].original_snippet, "Paris is nice");
    }

    #[tokio::test]
    async fn test_tool_calling_missing_optional_text_fields() {
        let model = MockChatModel::new(
            r#"[{"name": "Lyon", "address": "Lyon, France", "latitude": 45.764,
                 "longitude": 4.8357, "confidence": 8, "precision": 6}]"#,
        );
        let provider = ToolCallingProvider::new(model, tool(), ExtractorConfig::default());

        let records = provider.run("Lyon").await.unwrap();
        assert_eq!(records[0].status, "");
        assert_eq!(records[0].reasoning, "");
    }

    #[tokio::test]
    async fn test_tool_calling_non_conforming_output() {
        let model = MockChatModel::new("I could not find any places.");
        let provider = ToolCallingProvider::new(model, tool(), ExtractorConfig::default());

        let result = provider.run("Some text").await;
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_two_step_full_flow() {
        let mut model = MockChatModel::default();
        model.add_response("Paris is nice", r#"["Paris, France"]"#);

        let mut geocoder = MockGeocoder::new();
        geocoder.add_hit(
            "Paris, France",
            GeocodeHit::new(48.8566, 2.3522).with_address("Paris, Île-de-France, France"),
        );

        let provider = TwoStepProvider::new(model, geocoder, ExtractorConfig::default());
        let records = provider.run("Paris is nice").await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Paris, France");
        assert_eq!(records[0].address, "Paris, Île-de-France, France");
        assert_eq!(records[0].latitude, 48.8566);
        assert_eq!(records[0].longitude, 2.3522);
    }

    #[tokio::test]
    async fn test_two_step_colliding_coordinates_keep_first() {
        let model = MockChatModel::new(r#"["Kyiv", "Kiev, Ukraine"]"#);

        let mut geocoder = MockGeocoder::new();
        geocoder.add_hit("Kiev, Ukraine", GeocodeHit::new(50.45011, 30.52342));
        geocoder.add_hit("Kyiv", GeocodeHit::new(50.45009, 30.52338));

        let provider = TwoStepProvider::new(model, geocoder, ExtractorConfig::default());
        let records = provider.run("Kyiv, also spelled Kiev").await.unwrap();

        // Names are processed in sorted order, so "Kiev, Ukraine" comes first
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Kiev, Ukraine");
        assert_eq!(provider.geocoder().queries().len(), 2);
    }

    #[tokio::test]
    async fn test_two_step_distinct_coordinates_kept() {
        let model = MockChatModel::new(r#"["Aarhus", "Odense"]"#);

        let mut geocoder = MockGeocoder::new();
        geocoder.add_hit("Aarhus", GeocodeHit::new(56.1572, 10.2107));
        geocoder.add_hit("Odense", GeocodeHit::new(55.4038, 10.4024));

        let provider = TwoStepProvider::new(model, geocoder, ExtractorConfig::default());
        assert_eq!(provider.run("text").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_two_step_no_places() {
        let provider = TwoStepProvider::new(
            MockChatModel::new("[]"),
            MockGeocoder::new(),
            ExtractorConfig::default(),
        );

        let records = provider.run("Nothing to see here").await.unwrap();
        assert!(records.is_empty());
        assert!(provider.geocoder().queries().is_empty());
    }

    #[tokio::test]
    async fn test_two_step_model_failure() {
        let mut model = MockChatModel::default();
        model.add_error("text", "service unavailable");

        let provider = TwoStepProvider::new(model, MockGeocoder::new(), ExtractorConfig::default());
        let result = provider.run("text").await;

        match result {
            Err(ExtractorError::Llm(msg)) => assert!(msg.contains("service unavailable")),
            other => panic!("Expected Llm error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_both_providers_enforce_length_limit() {
        let mut config = ExtractorConfig::default();
        config.max_text_length = 5;
        let text = "Copenhagen";

        let tool_calling = ToolCallingProvider::new(MockChatModel::default(), tool(), config.clone());
        assert!(matches!(
            tool_calling.run(text).await,
            Err(ExtractorError::TextTooLong(10, 5))
        ));

        let two_step = TwoStepProvider::new(MockChatModel::default(), MockGeocoder::new(), config);
        assert!(matches!(
            two_step.run(text).await,
            Err(ExtractorError::TextTooLong(10, 5))
        ));
        assert_eq!(two_step.model().call_count(), 0);
    }
}
