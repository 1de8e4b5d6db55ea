//! Configuration management for the FarmIQ advisory service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with FARMIQ_ prefix

use std::path::PathBuf;
use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Flash message signing
    #[serde(default)]
    pub session: SessionConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Pre-trained model artifacts
    pub models: ModelsConfig,

    /// Static reference data
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// Largest accepted request body, in bytes (leaf image uploads)
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionConfig {
    /// Key for signing flash cookies; a random key is generated when unset
    pub secret_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelsConfig {
    /// Exported random forest for crop recommendation
    pub crop_model_path: PathBuf,

    /// ResNet9 weights for disease detection
    pub disease_model_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Crop → ideal N/P/K reference table
    pub fertilizer_csv_path: PathBuf,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FARMIQ_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let mut builder = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.max_upload_bytes", 10 * 1024 * 1024)?
            .set_default("weather.api_endpoint", "http://api.weatherapi.com/v1")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("models.crop_model_path", "models/crop_forest.json")?
            .set_default("models.disease_model_path", "models/plant_disease_model.pth")?
            .set_default("data.fertilizer_csv_path", "data/fertilizer.csv")?;

        // Legacy variable name used by earlier deployments
        if let Ok(api_key) = std::env::var("WEATHER_API_KEY") {
            builder = builder.set_default("weather.api_key", api_key)?;
        }

        let config = builder
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FARMIQ_ prefix)
            .add_source(
                Environment::with_prefix("FARMIQ")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "http://api.weatherapi.com/v1".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            crop_model_path: PathBuf::from("models/crop_forest.json"),
            disease_model_path: PathBuf::from("models/plant_disease_model.pth"),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            fertilizer_csv_path: PathBuf::from("data/fertilizer.csv"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            session: SessionConfig::default(),
            weather: WeatherConfig::default(),
            models: ModelsConfig::default(),
            data: DataConfig::default(),
        }
    }
}
