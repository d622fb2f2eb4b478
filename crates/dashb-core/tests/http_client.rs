//! Integration tests for HttpJsonClient using wiremock.

use dashb_core::http::parse_url;
use dashb_core::{HttpJsonClient, NetworkError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_json_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Forli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "name": "Forlì", "latitude": 44.22, "longitude": 12.04 }]
        })))
        .mount(&mock_server)
        .await;

    let client = HttpJsonClient::new().unwrap();
    let url = parse_url(&format!("{}/v1/search?name=Forli", mock_server.uri())).unwrap();
    let body = client.get_json(&url).await.unwrap();

    assert_eq!(body["results"][0]["name"], "Forlì");
}

#[tokio::test]
async fn test_get_json_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = HttpJsonClient::new().unwrap();
    let url = parse_url(&format!("{}/v1/forecast", mock_server.uri())).unwrap();
    let err = client.get_json(&url).await.unwrap_err();

    match err {
        NetworkError::ServerError { status, .. } => assert_eq!(status, 503),
        other => panic!("expected ServerError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_json_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&mock_server)
        .await;

    let client = HttpJsonClient::new().unwrap();
    let url = parse_url(&format!("{}/v1/forecast", mock_server.uri())).unwrap();
    let err = client.get_json(&url).await.unwrap_err();

    assert!(
        matches!(err, NetworkError::InvalidResponse(_)),
        "expected InvalidResponse, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_get_response_leaves_body_unread() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<rss></rss>"))
        .mount(&mock_server)
        .await;

    let client = HttpJsonClient::new().unwrap();
    let url = parse_url(&format!("{}/feed.xml", mock_server.uri())).unwrap();
    let response = client.get_response(&url).await.unwrap();

    assert_eq!(response.text().await.unwrap(), "<rss></rss>");
}
