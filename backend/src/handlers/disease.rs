//! Disease detection endpoint

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Response},
};

use crate::error::{AppError, AppResult};
use crate::services::{Diagnosis, DiseaseService};
use crate::views::{self, FormPage};
use crate::AppState;

/// POST /disease-predict
pub async fn disease_predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match diagnose(&state, multipart).await {
        Ok(diagnosis) => views::disease_result(diagnosis.label, &diagnosis.advisory).into_response(),
        Err(err) => err.respond(FormPage::Disease, &state.flash),
    }
}

async fn diagnose(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Diagnosis> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!("Not a multipart upload: {}", rejection);
        AppError::MissingFile
    })?;

    let image = read_file_field(&mut multipart).await?;
    DiseaseService::new(state.disease_model.clone())
        .diagnose(image.to_vec())
        .await
}

/// Find the `file` field; a missing filename or empty body counts as no selection
async fn read_file_field(multipart: &mut Multipart) -> AppResult<Bytes> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let has_name = field.file_name().is_some_and(|name| !name.is_empty());
        let bytes = field.bytes().await?;
        if !has_name || bytes.is_empty() {
            return Err(AppError::NoSelectedFile);
        }
        return Ok(bytes);
    }
    Err(AppError::MissingFile)
}
