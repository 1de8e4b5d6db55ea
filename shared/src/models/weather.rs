//! Weather data models

use serde::{Deserialize, Serialize};

/// Current conditions for a city, as needed by the crop classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
}

impl WeatherReading {
    pub fn new(temperature_celsius: f64, humidity_percent: f64) -> Self {
        Self {
            temperature_celsius,
            humidity_percent,
        }
    }
}
