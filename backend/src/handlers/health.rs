//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub models: ModelStatus,
}

/// Load status of each startup artifact
#[derive(Serialize)]
pub struct ModelStatus {
    pub crop: &'static str,
    pub disease: &'static str,
    pub fertilizer_table: &'static str,
}

fn status(loaded: bool) -> &'static str {
    if loaded {
        "loaded"
    } else {
        "unavailable"
    }
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let models = ModelStatus {
        crop: status(state.crop_model.is_some()),
        disease: status(state.disease_model.is_some()),
        fertilizer_table: status(state.nutrients.is_some()),
    };
    let degraded = state.crop_model.is_none()
        || state.disease_model.is_none()
        || state.nutrients.is_none();

    Json(HealthResponse {
        status: if degraded { "degraded" } else { "healthy" },
        version: env!("CARGO_PKG_VERSION"),
        models,
    })
}
