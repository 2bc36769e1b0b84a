//! Unit and integration tests for the LensClient.

use super::*;
use crate::error::{ApiError, Error};

#[test]
fn test_client_stores_token() {
    let client = LensClient::new("https://lens.example.com", Some("secret".to_string())).unwrap();
    assert_eq!(client.token(), Some("secret"));
}

#[test]
fn test_client_without_token() {
    let client = LensClient::new("https://lens.example.com", None).unwrap();
    assert!(client.token().is_none());
}

#[test]
fn test_client_trims_trailing_slash() {
    let client = LensClient::new("https://lens.example.com/api/", None).unwrap();
    assert_eq!(client.base_url(), "https://lens.example.com/api");
}

#[test]
fn test_client_debug_redacts_token() {
    let client = LensClient::new("https://lens.example.com", Some("test-token".to_string())).unwrap();
    let debug_str = format!("{:?}", client);
    assert!(
        !debug_str.contains("test-token"),
        "Token should be redacted in debug output"
    );
    assert!(debug_str.contains("REDACTED"));
}

#[test]
fn test_builder_custom_timeout() {
    let client = LensClient::builder("https://lens.example.com")
        .token("t")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    assert_eq!(client.token(), Some("t"));
}

#[test]
fn test_default_timeout_constant() {
    assert_eq!(DEFAULT_TIMEOUT_SECS, 30);
}

mod wiremock_tests {
    use super::*;
    use crate::models::{
        Condition, Filter, FilterGroup, Operator, ReadRequest, Sort, View, ViewConfig,
    };
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> LensClient {
        LensClient::new(server.uri(), Some("test-token".to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_config() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/config"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "attributes": [
                    {"name": "state", "type": "enum"},
                    {"name": "city", "type": "enum", "parentFilters": ["state"]}
                ],
                "uniqueFilters": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = client_for(&mock_server).fetch_config().await.unwrap();

        assert_eq!(config.attributes.len(), 2);
        assert!(config.unique_filters);
        assert!(config.attributes[1].depends_on("state"));
    }

    #[tokio::test]
    async fn test_read_posts_payload() {
        let mock_server = MockServer::start().await;

        let request = ReadRequest {
            sorts: vec![Sort::desc("age")],
            filters: Some(FilterGroup::and(vec![
                Condition::new("status", Operator::Is, "open").into(),
            ])),
            ..Default::default()
        };

        Mock::given(method("POST"))
            .and(path("/read"))
            .and(body_json(json!({
                "globalContext": {},
                "sorts": [{"field": "age", "direction": "desc"}],
                "filters": {
                    "op": "and",
                    "conditions": [{"attribute": "status", "op": "is", "value": "open"}]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": 1}, {"id": 2}],
                "total": 2
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = client_for(&mock_server).read(&request).await.unwrap();

        assert_eq!(response.data.len(), 2);
        assert_eq!(response.total, Some(2));
    }

    #[tokio::test]
    async fn test_save_view_creates_when_id_missing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/views"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "v1",
                "name": "Open",
                "config": {"filters": {}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let view = View::new("Open", ViewConfig::default());
        let saved = client_for(&mock_server).save_view(&view).await.unwrap();

        assert_eq!(saved.id, "v1");
        assert_eq!(saved.config.filters, Filter::Empty);
    }

    #[tokio::test]
    async fn test_save_view_replaces_when_id_present() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/views/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "v1",
                "name": "Renamed"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut view = View::new("Renamed", ViewConfig::default());
        view.id = "v1".to_string();
        let saved = client_for(&mock_server).save_view(&view).await.unwrap();

        assert_eq!(saved.name, "Renamed");
    }

    #[tokio::test]
    async fn test_delete_view_no_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/views/v1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        client_for(&mock_server).delete_view("v1").await.unwrap();
    }

    #[tokio::test]
    async fn test_view_id_is_a_single_path_segment() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/views/team%2Fopen%3Fdraft"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "team/open?draft",
                "name": "Open"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/views/team%2Fopen%3Fdraft"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let view = client.get_view("team/open?draft").await.unwrap();
        assert_eq!(view.id, "team/open?draft");
        client.delete_view("team/open?draft").await.unwrap();
    }

    #[tokio::test]
    async fn test_aggregate_options_unwraps_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/aggregate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "options": [
                    {"value": "LA", "label": "Los Angeles", "count": 12},
                    {"value": "SF"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let request = crate::models::AggregateRequest {
            attribute: "city".to_string(),
            ..Default::default()
        };
        let options = client_for(&mock_server)
            .aggregate_options(&request)
            .await
            .unwrap();

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].count, Some(12));
        assert_eq!(options[1].display_label(), "SF");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/views"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).list_views().await.unwrap_err();
        match err {
            Error::Api(ApiError::Auth { message }) => assert_eq!(message, "Authentication failed"),
            other => panic!("Expected Auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found_reports_endpoint() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/views/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).get_view("missing").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Api(ApiError::NotFound { ref resource }) if resource == "/views/missing"
        ));
    }

    #[tokio::test]
    async fn test_bad_request_maps_to_validation_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/read"))
            .respond_with(ResponseTemplate::new(400).set_body_string("unknown field 'foo'"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .read(&ReadRequest::default())
            .await
            .unwrap_err();
        match err {
            Error::Api(ApiError::Validation { message }) => {
                assert_eq!(message, "unknown field 'foo'")
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_reads_retry_after() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/config"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).fetch_config().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Api(ApiError::RateLimit {
                retry_after: Some(7)
            })
        ));
    }

    #[tokio::test]
    async fn test_server_error_uses_canonical_reason() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/config"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).fetch_config().await.unwrap_err();
        match err {
            Error::Api(ApiError::Http { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("Expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_body_is_json_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/config"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).fetch_config().await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
