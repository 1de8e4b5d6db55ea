//! External API integrations

pub mod weather;

pub use weather::{CurrentWeather, WeatherClient, WeatherError};
