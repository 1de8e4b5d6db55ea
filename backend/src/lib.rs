//! FarmIQ - agricultural advisory web service
//!
//! Crop recommendation from soil readings and local weather, fertilizer
//! advice from nutrient readings, and leaf disease detection from photos.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use shared::NutrientTable;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod external;
pub mod flash;
pub mod handlers;
pub mod inference;
pub mod knowledge;
pub mod routes;
pub mod services;
pub mod views;

pub use config::Config;
pub use error::{AppError, AppResult};

use external::WeatherClient;
use flash::FlashSigner;
use inference::{CropClassifier, DiseaseClassifier, RandomForest, ResNetClassifier};

/// Application state shared across handlers.
///
/// Each startup artifact is `None` when it failed to load; handlers that
/// depend on it answer with a 503 page instead of predicting.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather: WeatherClient,
    pub crop_model: Option<Arc<dyn CropClassifier>>,
    pub disease_model: Option<Arc<dyn DiseaseClassifier>>,
    pub nutrients: Option<Arc<NutrientTable>>,
    pub flash: FlashSigner,
}

impl AppState {
    /// Load every artifact named in the configuration, logging failures
    pub fn load(config: Config) -> anyhow::Result<Self> {
        let weather = WeatherClient::new(
            config.weather.api_key.clone(),
            config.weather.api_endpoint.clone(),
            config.weather.timeout(),
        )?;
        if !weather.is_configured() {
            tracing::warn!("No weather API key configured; crop recommendations will fail");
        }

        let crop_model = match RandomForest::from_path(&config.models.crop_model_path) {
            Ok(forest) => {
                tracing::info!(
                    "Crop recommendation model loaded ({} trees, {} classes)",
                    forest.trees.len(),
                    forest.classes.len()
                );
                Some(Arc::new(forest) as Arc<dyn CropClassifier>)
            }
            Err(e) => {
                tracing::error!("Error loading crop recommendation model: {}", e);
                None
            }
        };

        let disease_model = match ResNetClassifier::from_path(&config.models.disease_model_path) {
            Ok(model) => {
                tracing::info!("Disease detection model loaded");
                Some(Arc::new(model) as Arc<dyn DiseaseClassifier>)
            }
            Err(e) => {
                tracing::error!("Error loading disease model: {}", e);
                None
            }
        };

        let nutrients = match knowledge::load_nutrient_table(&config.data.fertilizer_csv_path) {
            Ok(table) => {
                tracing::info!("Fertilizer data loaded ({} crops)", table.len());
                Some(Arc::new(table))
            }
            Err(e) => {
                tracing::error!("Error loading fertilizer data: {}", e);
                None
            }
        };

        let flash = FlashSigner::from_secret(config.session.secret_key.as_deref());

        Ok(Self {
            config: Arc::new(config),
            weather,
            crop_model,
            disease_model,
            nutrients,
            flash,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .merge(routes::page_routes())
        .merge(routes::health_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
