//! Weather API client for fetching current conditions
//!
//! Integrates with WeatherAPI.com's `current.json` endpoint. Only the
//! temperature and humidity feed the crop classifier; the resolved
//! location name and observation time are kept for logging.

use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use shared::WeatherReading;
use thiserror::Error;

/// Failures while fetching current weather
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather API key is not configured")]
    NotConfigured,

    #[error("weather API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("weather provider error {code:?}: {message}")]
    Provider { code: Option<i64>, message: String },

    #[error("unexpected weather response: {0}")]
    Malformed(String),
}

/// Local observation time as reported by the provider
const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Current conditions for one city
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub reading: WeatherReading,
    pub location_name: Option<String>,
    pub last_updated: Option<NaiveDateTime>,
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

/// WeatherAPI.com response body. Every field is optional so that a
/// missing value is reported as malformed rather than a parse failure.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    location: Option<ApiLocation>,
    current: Option<ApiCurrent>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    temp_c: Option<f64>,
    humidity: Option<f64>,
    last_updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<i64>,
    message: Option<String>,
}

impl From<ApiError> for WeatherError {
    fn from(error: ApiError) -> Self {
        WeatherError::Provider {
            code: error.code,
            message: error.message.unwrap_or_else(|| "unknown error".to_string()),
        }
    }
}

impl WeatherClient {
    /// Create a new WeatherClient against the given endpoint
    pub fn new(
        api_key: Option<String>,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key: Some(api_key),
            base_url,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch current temperature and humidity for a city name
    pub async fn current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::NotConfigured)?;
        let url = format!("{}/current.json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("key", api_key), ("q", city)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // The provider reports unknown cities as 400 with an error object
            if let Ok(ApiResponse { error: Some(error), .. }) = serde_json::from_str(&body) {
                return Err(error.into());
            }
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: ApiResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Malformed(e.to_string()))?;
        parse_current(data)
    }
}

fn parse_current(data: ApiResponse) -> Result<CurrentWeather, WeatherError> {
    if let Some(error) = data.error {
        return Err(error.into());
    }

    let current = data
        .current
        .ok_or_else(|| WeatherError::Malformed("missing `current`".to_string()))?;
    let temperature = current
        .temp_c
        .ok_or_else(|| WeatherError::Malformed("missing `current.temp_c`".to_string()))?;
    let humidity = current
        .humidity
        .ok_or_else(|| WeatherError::Malformed("missing `current.humidity`".to_string()))?;

    Ok(CurrentWeather {
        reading: WeatherReading::new(temperature, humidity),
        location_name: data.location.and_then(|location| location.name),
        last_updated: current
            .last_updated
            .as_deref()
            .and_then(|value| NaiveDateTime::parse_from_str(value, LAST_UPDATED_FORMAT).ok()),
    })
}
