//! Crop recommendation models

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::weather::WeatherReading;

/// Number of features the tabular crop classifier was trained on
pub const FEATURE_COUNT: usize = 7;

/// Feature names in the order the classifier expects them
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "N",
    "P",
    "K",
    "temperature",
    "humidity",
    "ph",
    "rainfall",
];

/// Raw crop form as submitted by the browser
///
/// Every field is optional text so that malformed input reaches validation
/// instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CropForm {
    pub nitrogen: Option<String>,
    pub phosphorous: Option<String>,
    pub pottasium: Option<String>,
    pub ph: Option<String>,
    pub rainfall: Option<String>,
    pub city: Option<String>,
}

/// Validated crop recommendation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CropQuery {
    pub nitrogen: i64,
    pub phosphorus: i64,
    pub potassium: i64,
    pub ph: f64,
    pub rainfall: f64,
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: String,
}

/// Ordered input for the crop classifier:
/// `[N, P, K, temperature, humidity, pH, rainfall]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Combine the soil readings of a query with the current weather
    pub fn from_query(query: &CropQuery, weather: &WeatherReading) -> Self {
        Self([
            query.nitrogen as f64,
            query.phosphorus as f64,
            query.potassium as f64,
            weather.temperature_celsius,
            weather.humidity_percent,
            query.ph,
            query.rainfall,
        ])
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}
