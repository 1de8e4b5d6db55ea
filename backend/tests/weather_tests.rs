//! Tests for the weather API client against a mock provider

use farmiq_backend::external::{WeatherClient, WeatherError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> WeatherClient {
    WeatherClient::with_base_url("test-key".to_string(), server.uri())
}

#[tokio::test]
async fn test_current_weather_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "New Delhi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "name": "New Delhi", "country": "India" },
            "current": { "temp_c": 31.2, "humidity": 48, "last_updated": "2024-05-20 14:15" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let weather = client(&server).current("New Delhi").await.unwrap();
    assert_eq!(weather.reading.temperature_celsius, 31.2);
    assert_eq!(weather.reading.humidity_percent, 48.0);
    assert_eq!(weather.location_name.as_deref(), Some("New Delhi"));
    assert!(weather.last_updated.is_some());
}

#[tokio::test]
async fn test_unknown_city_reports_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&server)
        .await;

    match client(&server).current("Atlantis").await {
        Err(WeatherError::Provider { code, message }) => {
            assert_eq!(code, Some(1006));
            assert_eq!(message, "No matching location found.");
        }
        other => panic!("Expected provider error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_error_object_on_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": { "code": 2006, "message": "API key is invalid." }
        })))
        .mount(&server)
        .await;

    let err = client(&server).current("Pune").await.unwrap_err();
    assert!(matches!(err, WeatherError::Provider { code: Some(2006), .. }));
}

#[tokio::test]
async fn test_server_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client(&server).current("Pune").await.unwrap_err();
    assert!(matches!(err, WeatherError::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client(&server).current("Pune").await.unwrap_err();
    assert!(matches!(err, WeatherError::Malformed(_)));
}

#[tokio::test]
async fn test_missing_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "current": { "humidity": 70 } })),
        )
        .mount(&server)
        .await;

    let err = client(&server).current("Pune").await.unwrap_err();
    assert!(matches!(err, WeatherError::Malformed(_)));
}

#[tokio::test]
async fn test_unreachable_provider() {
    // Nothing listens on the discard port
    let client = WeatherClient::with_base_url("k".to_string(), "http://127.0.0.1:9".to_string());
    let err = client.current("Pune").await.unwrap_err();
    assert!(matches!(err, WeatherError::Request(_)));
}
