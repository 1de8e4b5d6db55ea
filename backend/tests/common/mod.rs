//! Helpers shared by the router integration tests
#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use farmiq_backend::{
    create_app,
    external::WeatherClient,
    flash::{FlashSigner, FLASH_COOKIE},
    inference::{preprocess, CropClassifier, DiseaseClassifier, ModelError},
    knowledge, AppState, Config,
};
use http_body_util::BodyExt;
use shared::{DiseaseLabel, FeatureVector};
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

/// Crop classifier that records every feature vector it is given
pub struct RecordingClassifier {
    pub answer: String,
    pub calls: Mutex<Vec<FeatureVector>>,
}

impl RecordingClassifier {
    pub fn new(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: answer.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<FeatureVector> {
        self.calls.lock().unwrap().clone()
    }
}

impl CropClassifier for RecordingClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<String, ModelError> {
        self.calls.lock().unwrap().push(*features);
        Ok(self.answer.clone())
    }
}

/// Disease classifier that runs the real preprocessing, then answers a fixed label
pub struct FixedDiseaseClassifier(pub DiseaseLabel);

impl DiseaseClassifier for FixedDiseaseClassifier {
    fn classify(&self, image_bytes: &[u8]) -> Result<DiseaseLabel, ModelError> {
        preprocess::prepare(image_bytes)?;
        Ok(self.0)
    }
}

/// State with the shipped nutrient table and no models loaded
pub fn test_state(weather_url: &str) -> AppState {
    let csv = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/fertilizer.csv");
    let table = knowledge::load_nutrient_table(&csv).unwrap();

    AppState {
        config: Arc::new(Config::default()),
        weather: WeatherClient::with_base_url("test-key".to_string(), weather_url.to_string()),
        crop_model: None,
        disease_model: None,
        nutrients: Some(Arc::new(table)),
        flash: FlashSigner::new(SECRET),
    }
}

pub fn app(state: AppState) -> Router {
    create_app(state)
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// POST without a `Content-Type` header
pub fn bare_post_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `name=value` of the flash cookie set by a response
pub fn flash_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{FLASH_COOKIE}=")))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Decoded flash message carried by a response
pub fn flash_message(response: &Response<Body>) -> Option<String> {
    let cookie = flash_cookie(response)?;
    let (_, value) = cookie.split_once('=')?;
    FlashSigner::new(SECRET).verify(value)
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}
