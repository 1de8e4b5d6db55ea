//! Fertilizer suggestion endpoint

use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Response},
    Form,
};
use shared::{parse_fertilizer_form, FertilizerForm};

use crate::error::{AppError, AppResult};
use crate::services::{FertilizerRecommendation, FertilizerService};
use crate::views::{self, FormPage};
use crate::AppState;

/// POST /fertilizer-predict
pub async fn fertilizer_predict(
    State(state): State<AppState>,
    form: Result<Form<FertilizerForm>, FormRejection>,
) -> Response {
    match recommend(&state, form) {
        Ok(recommendation) => {
            views::fertilizer_result(&recommendation.summary, &recommendation.advisory)
                .into_response()
        }
        Err(err) => err.respond(FormPage::Fertilizer, &state.flash),
    }
}

fn recommend(
    state: &AppState,
    form: Result<Form<FertilizerForm>, FormRejection>,
) -> AppResult<FertilizerRecommendation> {
    let Form(form) = form.map_err(AppError::from)?;
    let query = parse_fertilizer_form(&form)?;
    FertilizerService::new(state.nutrients.clone()).recommend(&query)
}
