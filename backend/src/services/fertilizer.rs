//! Fertilizer advice from the gap between ideal and measured nutrients

use std::sync::Arc;

use shared::{
    fertilizer_advice, imbalance_summary, select_imbalance, Advisory, FertilizerQuery,
    NutrientDeltas, NutrientImbalance, NutrientTable,
};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct FertilizerRecommendation {
    pub imbalance: NutrientImbalance,
    pub summary: String,
    pub advisory: Advisory,
}

/// Fertilizer recommendation service
#[derive(Clone)]
pub struct FertilizerService {
    table: Option<Arc<NutrientTable>>,
}

impl FertilizerService {
    pub fn new(table: Option<Arc<NutrientTable>>) -> Self {
        Self { table }
    }

    /// Compare the reading against the crop's reference row and pick the
    /// advisory for the most out-of-range nutrient
    pub fn recommend(&self, query: &FertilizerQuery) -> AppResult<FertilizerRecommendation> {
        let table = self
            .table
            .as_ref()
            .ok_or(AppError::ModelUnavailable("fertilizer reference table"))?;

        let reference = table
            .lookup(&query.crop_name)
            .ok_or_else(|| AppError::CropNotFound {
                crop: query.crop_name.clone(),
            })?;

        let deltas = NutrientDeltas::between(reference, query)?;
        let imbalance = select_imbalance(&deltas);
        tracing::debug!(
            crop = %query.crop_name,
            ?deltas,
            key = imbalance.advice_key(),
            "Selected nutrient advisory"
        );

        Ok(FertilizerRecommendation {
            imbalance,
            summary: imbalance_summary(&imbalance),
            advisory: fertilizer_advice(&imbalance),
        })
    }
}
