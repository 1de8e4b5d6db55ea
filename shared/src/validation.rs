//! Form validation for the FarmIQ advisory forms
//!
//! Browsers submit every field as text. These helpers turn the raw forms
//! into validated queries, reporting the first field that is missing or
//! malformed.

use thiserror::Error;
use validator::Validate;

use crate::models::{CropForm, CropQuery, FertilizerForm, FertilizerQuery};

/// A form field that could not be accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("field `{field}` is not a valid {expected}: {value:?}")]
    NotNumeric {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("field `{0}` must not be empty")]
    Empty(&'static str),

    #[error("field `{0}` is too far from its reference value")]
    OutOfRange(&'static str),

    #[error("form body could not be decoded: {0}")]
    Unreadable(String),
}

impl ValidationError {
    /// Name of the offending form field, if a single field is to blame
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Missing(field)
            | ValidationError::Empty(field)
            | ValidationError::OutOfRange(field)
            | ValidationError::NotNumeric { field, .. } => Some(*field),
            ValidationError::Unreadable(_) => None,
        }
    }
}

// ============================================================================
// Field parsing
// ============================================================================

/// Parse an integer field; surrounding whitespace and a leading sign are accepted
pub fn parse_int_field(field: &'static str, raw: Option<&str>) -> Result<i64, ValidationError> {
    let raw = raw.ok_or(ValidationError::Missing(field))?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotNumeric {
            field,
            expected: "integer",
            value: raw.to_string(),
        })
}

/// Parse a finite floating point field
pub fn parse_float_field(field: &'static str, raw: Option<&str>) -> Result<f64, ValidationError> {
    let raw = raw.ok_or(ValidationError::Missing(field))?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotNumeric {
            field,
            expected: "number",
            value: raw.to_string(),
        }),
    }
}

/// Require a text field to be present, kept verbatim; empty values are left to [`Validate`]
fn text_field(field: &'static str, raw: Option<&str>) -> Result<String, ValidationError> {
    raw.map(str::to_string).ok_or(ValidationError::Missing(field))
}

// ============================================================================
// Form validation
// ============================================================================

/// Validate the crop recommendation form.
///
/// Numeric fields are checked before the city so that a form with both
/// problems reports the numeric one.
pub fn parse_crop_form(form: &CropForm) -> Result<CropQuery, ValidationError> {
    let nitrogen = parse_int_field("nitrogen", form.nitrogen.as_deref())?;
    let phosphorus = parse_int_field("phosphorous", form.phosphorous.as_deref())?;
    let potassium = parse_int_field("pottasium", form.pottasium.as_deref())?;
    let ph = parse_float_field("ph", form.ph.as_deref())?;
    let rainfall = parse_float_field("rainfall", form.rainfall.as_deref())?;
    let city = form
        .city
        .as_deref()
        .map(|city| city.trim().to_string())
        .unwrap_or_default();

    let query = CropQuery {
        nitrogen,
        phosphorus,
        potassium,
        ph,
        rainfall,
        city,
    };
    query
        .validate()
        .map_err(|_| ValidationError::Empty("city"))?;
    Ok(query)
}

/// Validate the fertilizer recommendation form
pub fn parse_fertilizer_form(form: &FertilizerForm) -> Result<FertilizerQuery, ValidationError> {
    let crop_name = text_field("cropname", form.cropname.as_deref())?;
    let nitrogen = parse_int_field("nitrogen", form.nitrogen.as_deref())?;
    let phosphorus = parse_int_field("phosphorous", form.phosphorous.as_deref())?;
    let potassium = parse_int_field("pottasium", form.pottasium.as_deref())?;

    let query = FertilizerQuery {
        crop_name,
        nitrogen,
        phosphorus,
        potassium,
    };
    query
        .validate()
        .map_err(|_| ValidationError::Empty("cropname"))?;
    Ok(query)
}
