//! Crop recommendation from soil readings and current weather

use std::sync::Arc;

use shared::{CropQuery, FeatureVector};

use crate::error::{AppError, AppResult};
use crate::external::{CurrentWeather, WeatherClient};
use crate::inference::CropClassifier;

/// Outcome of a successful recommendation
#[derive(Debug, Clone)]
pub struct CropRecommendation {
    pub crop: String,
    pub weather: CurrentWeather,
    pub features: FeatureVector,
}

/// Crop recommendation service
#[derive(Clone)]
pub struct CropService {
    weather: WeatherClient,
    classifier: Option<Arc<dyn CropClassifier>>,
}

impl CropService {
    pub fn new(weather: WeatherClient, classifier: Option<Arc<dyn CropClassifier>>) -> Self {
        Self {
            weather,
            classifier,
        }
    }

    /// Look up the city's weather, then ask the classifier for a crop.
    ///
    /// The classifier is never consulted when the weather lookup fails.
    pub async fn recommend(&self, query: &CropQuery) -> AppResult<CropRecommendation> {
        let classifier = self
            .classifier
            .as_ref()
            .ok_or(AppError::ModelUnavailable("crop recommendation model"))?;

        let weather = self
            .weather
            .current(&query.city)
            .await
            .map_err(|source| AppError::WeatherUnavailable {
                city: query.city.clone(),
                source,
            })?;

        tracing::debug!(
            city = %query.city,
            location = ?weather.location_name,
            observed = ?weather.last_updated,
            temperature = weather.reading.temperature_celsius,
            humidity = weather.reading.humidity_percent,
            "Fetched weather"
        );

        let features = FeatureVector::from_query(query, &weather.reading);
        let crop = classifier
            .predict(&features)
            .map_err(|e| AppError::Internal(format!("crop prediction failed: {e}")))?;

        tracing::info!("Recommended crop {} for {}", crop, query.city);

        Ok(CropRecommendation {
            crop,
            weather,
            features,
        })
    }
}
