//! Error handling for the FarmIQ advisory service
//!
//! Every failure maps to a fixed user-facing message. Raw error detail is
//! only ever written to the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::ValidationError;
use thiserror::Error;

use crate::external::WeatherError;
use crate::flash::FlashSigner;
use crate::inference::ModelError;
use crate::views::{self, FormPage};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // User input errors
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("multipart request has no `file` field")]
    MissingFile,

    #[error("uploaded file has no name or content")]
    NoSelectedFile,

    #[error("could not read upload: {0}")]
    Upload(#[from] axum::extract::multipart::MultipartError),

    // Collaborator errors
    #[error("weather unavailable for {city:?}: {source}")]
    WeatherUnavailable {
        city: String,
        #[source]
        source: WeatherError,
    },

    #[error("crop {crop:?} is not in the nutrient table")]
    CropNotFound { crop: String },

    #[error("image rejected: {0}")]
    ImageRejected(#[source] ModelError),

    // Infrastructure errors
    #[error("{0} is not loaded")]
    ModelUnavailable(&'static str),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Fixed message shown to the user after redirecting back to `page`
    pub fn user_message(&self, page: FormPage) -> String {
        match self {
            AppError::Validation(ValidationError::Empty("city")) => {
                "Please enter a city name.".to_string()
            }
            AppError::Validation(_) => match page {
                FormPage::Fertilizer => {
                    "Invalid input. Please fill all fields with appropriate values.".to_string()
                }
                _ => "Invalid input. Please enter numeric values for all fields.".to_string(),
            },
            AppError::MissingFile => "No file part".to_string(),
            AppError::NoSelectedFile => "No selected file".to_string(),
            AppError::Upload(_) => {
                "The upload could not be read. Please try again with a smaller image file."
                    .to_string()
            }
            AppError::WeatherUnavailable { city, .. } => format!(
                "Could not fetch weather data for '{city}'. Please check the city name and try again."
            ),
            AppError::CropNotFound { crop } => {
                format!("Fertilizer information for '{crop}' is not available.")
            }
            AppError::ImageRejected(_) => {
                "Could not process the uploaded image. Please try again with a valid image file."
                    .to_string()
            }
            AppError::ModelUnavailable(_) => {
                "This service is temporarily unavailable. Please try again later.".to_string()
            }
            AppError::Internal(_) => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }

    /// Render the error for a request submitted from `page`.
    ///
    /// Input and collaborator errors redirect back to the form with a
    /// flash message; missing artifacts and internal faults render an
    /// error page directly.
    pub fn respond(self, page: FormPage, flash: &FlashSigner) -> Response {
        match &self {
            AppError::ModelUnavailable(_) | AppError::Internal(_) => {
                tracing::error!("Request to {} failed: {}", page.path(), self)
            }
            _ => tracing::warn!("Request to {} rejected: {}", page.path(), self),
        }

        match self {
            AppError::ModelUnavailable(what) => (
                StatusCode::SERVICE_UNAVAILABLE,
                views::unavailable_page(page, what),
            )
                .into_response(),
            AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, views::error_page(page)).into_response()
            }
            other => flash.redirect(page.path(), &other.user_message(page)),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("blocking task failed: {err}"))
    }
}

impl From<axum::extract::rejection::FormRejection> for AppError {
    fn from(rejection: axum::extract::rejection::FormRejection) -> Self {
        AppError::Validation(ValidationError::Unreadable(rejection.body_text()))
    }
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    fn signer() -> FlashSigner {
        FlashSigner::new("test-secret")
    }

    #[test]
    fn test_crop_messages() {
        let numeric = AppError::Validation(ValidationError::Missing("ph"));
        assert_eq!(
            numeric.user_message(FormPage::Crop),
            "Invalid input. Please enter numeric values for all fields."
        );
        let city = AppError::Validation(ValidationError::Empty("city"));
        assert_eq!(city.user_message(FormPage::Crop), "Please enter a city name.");
    }

    #[test]
    fn test_fertilizer_messages() {
        let err = AppError::Validation(ValidationError::Empty("cropname"));
        assert_eq!(
            err.user_message(FormPage::Fertilizer),
            "Invalid input. Please fill all fields with appropriate values."
        );
        let missing = AppError::CropNotFound {
            crop: "wheat".into(),
        };
        assert_eq!(
            missing.user_message(FormPage::Fertilizer),
            "Fertilizer information for 'wheat' is not available."
        );
    }

    #[test]
    fn test_image_message_hides_detail() {
        let err = AppError::ImageRejected(ModelError::Decode("bad PNG signature".into()));
        assert!(!err.user_message(FormPage::Disease).contains("PNG"));
    }

    #[test]
    fn test_user_errors_redirect_to_form() {
        let response = AppError::MissingFile.respond(FormPage::Disease, &signer());
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/disease");
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }

    #[test]
    fn test_unavailable_model_is_503() {
        let response =
            AppError::ModelUnavailable("crop recommendation model").respond(FormPage::Crop, &signer());
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!response.headers().contains_key(header::SET_COOKIE));
    }

    #[test]
    fn test_internal_is_500() {
        let response = AppError::Internal("boom".into()).respond(FormPage::Fertilizer, &signer());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
