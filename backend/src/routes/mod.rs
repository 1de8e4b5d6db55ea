//! Route definitions for the FarmIQ advisory service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Form pages and their prediction endpoints
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home))
        // Crop recommendation
        .route("/crop-recommend", get(handlers::crop_form))
        .route("/crop-predict", post(handlers::crop_predict))
        // Fertilizer suggestion
        .route("/fertilizer", get(handlers::fertilizer_form))
        .route("/fertilizer-predict", post(handlers::fertilizer_predict))
        // Disease detection
        .route("/disease", get(handlers::disease_form))
        .route("/disease-predict", post(handlers::disease_predict))
}

/// Operational endpoints
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}
