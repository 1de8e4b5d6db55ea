//! Router tests for crop recommendation

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::*;
use farmiq_backend::inference::CropClassifier;
use shared::FeatureVector;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VALID_FORM: &str =
    "nitrogen=90&phosphorous=42&pottasium=43&ph=6.5&rainfall=202.9&city=Mumbai";

async fn weather_ok(server: &MockServer, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", "Mumbai"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "name": "Mumbai" },
            "current": { "temp_c": 29.5, "humidity": 83 }
        })))
        .expect(calls)
        .mount(server)
        .await;
}

fn state_with(server: &MockServer, classifier: &Arc<RecordingClassifier>) -> farmiq_backend::AppState {
    let mut state = test_state(&server.uri());
    state.crop_model = Some(classifier.clone() as Arc<dyn CropClassifier>);
    state
}

// =============================================================================
// Successful prediction
// =============================================================================

#[tokio::test]
async fn test_prediction_renders_crop() {
    let server = MockServer::start().await;
    weather_ok(&server, 1).await;
    let classifier = RecordingClassifier::new("rice");

    let response = send(
        app(state_with(&server, &classifier)),
        form_request("/crop-predict", VALID_FORM),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<title>FarmIQ - Crop Recommendation</title>"));
    assert!(body.contains("<strong>rice</strong>"));
}

#[tokio::test]
async fn test_feature_vector_order() {
    let server = MockServer::start().await;
    weather_ok(&server, 1).await;
    let classifier = RecordingClassifier::new("rice");

    send(
        app(state_with(&server, &classifier)),
        form_request("/crop-predict", VALID_FORM),
    )
    .await;

    assert_eq!(
        classifier.calls(),
        vec![FeatureVector::from([90.0, 42.0, 43.0, 29.5, 83.0, 6.5, 202.9])]
    );
}

#[tokio::test]
async fn test_whitespace_around_numbers_is_accepted() {
    let server = MockServer::start().await;
    weather_ok(&server, 1).await;
    let classifier = RecordingClassifier::new("maize");

    let form = "nitrogen=+90&phosphorous=%2042&pottasium=43%20&ph=6.5&rainfall=202.9&city=%20Mumbai%20";
    let response = send(
        app(state_with(&server, &classifier)),
        form_request("/crop-predict", form),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(classifier.calls().len(), 1);
}

// =============================================================================
// Failures redirect back to the form
// =============================================================================

#[tokio::test]
async fn test_weather_failure_redirects_without_classifying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let classifier = RecordingClassifier::new("rice");

    let response = send(
        app(state_with(&server, &classifier)),
        form_request("/crop-predict", VALID_FORM),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/crop-recommend"));
    assert_eq!(
        flash_message(&response).as_deref(),
        Some("Could not fetch weather data for 'Mumbai'. Please check the city name and try again.")
    );
    assert!(classifier.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_weather_reply_redirects_without_classifying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": {}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let classifier = RecordingClassifier::new("rice");

    let response = send(
        app(state_with(&server, &classifier)),
        form_request("/crop-predict", VALID_FORM),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/crop-recommend"));
    assert_eq!(
        flash_message(&response).as_deref(),
        Some("Could not fetch weather data for 'Mumbai'. Please check the city name and try again.")
    );
    assert!(classifier.calls().is_empty());
}

#[tokio::test]
async fn test_body_without_form_content_type_redirects() {
    let server = MockServer::start().await;
    weather_ok(&server, 0).await;
    let classifier = RecordingClassifier::new("rice");

    let response = send(
        app(state_with(&server, &classifier)),
        bare_post_request("/crop-predict", VALID_FORM),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/crop-recommend"));
    assert_eq!(
        flash_message(&response).as_deref(),
        Some("Invalid input. Please enter numeric values for all fields.")
    );
    assert!(classifier.calls().is_empty());
}

#[tokio::test]
async fn test_repeated_field_redirects() {
    let server = MockServer::start().await;
    weather_ok(&server, 0).await;
    let classifier = RecordingClassifier::new("rice");

    let form = format!("{VALID_FORM}&city=Pune");
    let response = send(
        app(state_with(&server, &classifier)),
        form_request("/crop-predict", &form),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        flash_message(&response).as_deref(),
        Some("Invalid input. Please enter numeric values for all fields.")
    );
    assert!(classifier.calls().is_empty());
}

#[tokio::test]
async fn test_non_numeric_field_skips_weather() {
    let server = MockServer::start().await;
    weather_ok(&server, 0).await;
    let classifier = RecordingClassifier::new("rice");

    let form = "nitrogen=ninety&phosphorous=42&pottasium=43&ph=6.5&rainfall=202.9&city=Mumbai";
    let response = send(
        app(state_with(&server, &classifier)),
        form_request("/crop-predict", form),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        flash_message(&response).as_deref(),
        Some("Invalid input. Please enter numeric values for all fields.")
    );
    assert!(classifier.calls().is_empty());
}

#[tokio::test]
async fn test_missing_field() {
    let server = MockServer::start().await;
    let classifier = RecordingClassifier::new("rice");

    let form = "nitrogen=90&phosphorous=42&ph=6.5&rainfall=202.9&city=Mumbai";
    let response = send(
        app(state_with(&server, &classifier)),
        form_request("/crop-predict", form),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        flash_message(&response).as_deref(),
        Some("Invalid input. Please enter numeric values for all fields.")
    );
}

#[tokio::test]
async fn test_blank_city() {
    let server = MockServer::start().await;
    let classifier = RecordingClassifier::new("rice");

    let form = "nitrogen=90&phosphorous=42&pottasium=43&ph=6.5&rainfall=202.9&city=";
    let response = send(
        app(state_with(&server, &classifier)),
        form_request("/crop-predict", form),
    )
    .await;

    assert_eq!(
        flash_message(&response).as_deref(),
        Some("Please enter a city name.")
    );
}

#[tokio::test]
async fn test_flash_shown_once_on_form() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&server)
        .await;
    let classifier = RecordingClassifier::new("rice");
    let state = state_with(&server, &classifier);

    let form = "nitrogen=90&phosphorous=42&pottasium=43&ph=6.5&rainfall=202.9&city=%3Cb%3Ex";
    let redirect = send(app(state.clone()), form_request("/crop-predict", form)).await;
    let cookie = flash_cookie(&redirect).unwrap();

    let page = send(app(state), get_request("/crop-recommend", Some(&cookie))).await;
    assert_eq!(page.status(), StatusCode::OK);
    let cleared = flash_cookie(&page).unwrap();
    assert_eq!(cleared, "farmiq_flash=");

    let body = body_text(page).await;
    assert!(body.contains("Could not fetch weather data for &#x27;&lt;b&gt;x&#x27;"));
    assert!(!body.contains("<b>x"));
}

#[tokio::test]
async fn test_tampered_flash_is_ignored() {
    let server = MockServer::start().await;
    let state = test_state(&server.uri());

    let page = send(
        app(state),
        get_request("/crop-recommend", Some("farmiq_flash=aGVsbG8.bm90LWEtc2ln")),
    )
    .await;

    let body = body_text(page).await;
    assert!(!body.contains("class=\"flash\""));
}

// =============================================================================
// Model availability
// =============================================================================

#[tokio::test]
async fn test_missing_model_is_service_unavailable() {
    let server = MockServer::start().await;
    weather_ok(&server, 0).await;

    let response = send(
        app(test_state(&server.uri())),
        form_request("/crop-predict", VALID_FORM),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_text(response).await;
    assert!(body.contains("crop recommendation model"));
}
