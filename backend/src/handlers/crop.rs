//! Crop recommendation endpoint

use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Response},
    Form,
};
use shared::{parse_crop_form, CropForm};

use crate::error::{AppError, AppResult};
use crate::services::{CropRecommendation, CropService};
use crate::views::{self, FormPage};
use crate::AppState;

/// POST /crop-predict
pub async fn crop_predict(
    State(state): State<AppState>,
    form: Result<Form<CropForm>, FormRejection>,
) -> Response {
    match recommend(&state, form).await {
        Ok(recommendation) => views::crop_result(&recommendation.crop).into_response(),
        Err(err) => err.respond(FormPage::Crop, &state.flash),
    }
}

async fn recommend(
    state: &AppState,
    form: Result<Form<CropForm>, FormRejection>,
) -> AppResult<CropRecommendation> {
    let Form(form) = form.map_err(AppError::from)?;
    let query = parse_crop_form(&form)?;
    let service = CropService::new(state.weather.clone(), state.crop_model.clone());
    service.recommend(&query).await
}
