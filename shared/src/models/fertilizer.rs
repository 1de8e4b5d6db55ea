//! Fertilizer recommendation models
//!
//! The reference table maps a crop to its ideal N/P/K levels. A query is
//! compared against that row and the nutrient that is furthest from its
//! ideal value decides which advisory is shown.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::validation::ValidationError;

/// Raw fertilizer form as submitted by the browser
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FertilizerForm {
    pub cropname: Option<String>,
    pub nitrogen: Option<String>,
    pub phosphorous: Option<String>,
    pub pottasium: Option<String>,
}

/// Validated fertilizer recommendation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FertilizerQuery {
    #[validate(length(min = 1, message = "crop name must not be empty"))]
    pub crop_name: String,
    pub nitrogen: i64,
    pub phosphorus: i64,
    pub potassium: i64,
}

/// Ideal nutrient levels for one crop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientReferenceRow {
    pub crop: String,
    pub nitrogen: i64,
    pub phosphorus: i64,
    pub potassium: i64,
}

/// Errors raised while building a [`NutrientTable`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("nutrient table has no rows")]
    Empty,

    #[error("crop `{0}` appears more than once in the nutrient table")]
    DuplicateCrop(String),
}

/// Read-only crop → ideal N/P/K lookup, keyed by exact crop name
#[derive(Debug, Clone)]
pub struct NutrientTable {
    rows: Vec<NutrientReferenceRow>,
    index: HashMap<String, usize>,
}

impl NutrientTable {
    /// Build a table, rejecting duplicate crop names
    pub fn new(rows: Vec<NutrientReferenceRow>) -> Result<Self, TableError> {
        if rows.is_empty() {
            return Err(TableError::Empty);
        }

        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if index.insert(row.crop.clone(), i).is_some() {
                return Err(TableError::DuplicateCrop(row.crop.clone()));
            }
        }

        Ok(Self { rows, index })
    }

    /// Exact, case-sensitive lookup
    pub fn lookup(&self, crop: &str) -> Option<&NutrientReferenceRow> {
        self.index.get(crop).map(|&i| &self.rows[i])
    }

    /// Crop names in table order
    pub fn crops(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.crop.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three macronutrients, in comparison precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl Nutrient {
    /// Precedence used to break ties between equal deltas
    pub const PRECEDENCE: [Nutrient; 3] =
        [Nutrient::Nitrogen, Nutrient::Phosphorus, Nutrient::Potassium];

    pub fn symbol(&self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "N",
            Nutrient::Phosphorus => "P",
            Nutrient::Potassium => "K",
        }
    }
}

impl std::fmt::Display for Nutrient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Nutrient::Nitrogen => write!(f, "Nitrogen"),
            Nutrient::Phosphorus => write!(f, "Phosphorus"),
            Nutrient::Potassium => write!(f, "Potassium"),
        }
    }
}

/// Whether the soil holds more or less of a nutrient than the crop needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NutrientLevel {
    /// Current value exceeds the ideal (negative delta)
    High,
    /// Current value is at or below the ideal (non-negative delta)
    Low,
}

/// `ideal - current` for each nutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientDeltas {
    pub nitrogen: i64,
    pub phosphorus: i64,
    pub potassium: i64,
}

impl NutrientDeltas {
    /// Fails with [`ValidationError::OutOfRange`] when a reading is so far
    /// from the reference that the difference does not fit in an `i64`
    pub fn between(
        reference: &NutrientReferenceRow,
        query: &FertilizerQuery,
    ) -> Result<Self, ValidationError> {
        let delta = |field, ideal: i64, current: i64| {
            ideal
                .checked_sub(current)
                .ok_or(ValidationError::OutOfRange(field))
        };

        Ok(Self {
            nitrogen: delta("nitrogen", reference.nitrogen, query.nitrogen)?,
            phosphorus: delta("phosphorous", reference.phosphorus, query.phosphorus)?,
            potassium: delta("pottasium", reference.potassium, query.potassium)?,
        })
    }

    pub fn get(&self, nutrient: Nutrient) -> i64 {
        match nutrient {
            Nutrient::Nitrogen => self.nitrogen,
            Nutrient::Phosphorus => self.phosphorus,
            Nutrient::Potassium => self.potassium,
        }
    }
}

/// The nutrient that most needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientImbalance {
    pub nutrient: Nutrient,
    pub level: NutrientLevel,
    pub delta: i64,
}

impl NutrientImbalance {
    /// Key of the matching fertilizer advisory (`NHigh`, `Nlow`, ...)
    pub fn advice_key(&self) -> &'static str {
        match (self.nutrient, self.level) {
            (Nutrient::Nitrogen, NutrientLevel::High) => "NHigh",
            (Nutrient::Nitrogen, NutrientLevel::Low) => "Nlow",
            (Nutrient::Phosphorus, NutrientLevel::High) => "PHigh",
            (Nutrient::Phosphorus, NutrientLevel::Low) => "Plow",
            (Nutrient::Potassium, NutrientLevel::High) => "KHigh",
            (Nutrient::Potassium, NutrientLevel::Low) => "Klow",
        }
    }
}

/// Pick the nutrient with the largest absolute delta.
///
/// Ties resolve by [`Nutrient::PRECEDENCE`]: N before P before K.
pub fn select_imbalance(deltas: &NutrientDeltas) -> NutrientImbalance {
    let mut winner = Nutrient::Nitrogen;
    for nutrient in Nutrient::PRECEDENCE {
        if deltas.get(nutrient).unsigned_abs() > deltas.get(winner).unsigned_abs() {
            winner = nutrient;
        }
    }

    let delta = deltas.get(winner);
    let level = if delta < 0 {
        NutrientLevel::High
    } else {
        NutrientLevel::Low
    };

    NutrientImbalance {
        nutrient: winner,
        level,
        delta,
    }
}
