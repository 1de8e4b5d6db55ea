//! Leaf disease diagnosis

use std::sync::Arc;

use shared::{disease_remedy, Advisory, DiseaseLabel};

use crate::error::{AppError, AppResult};
use crate::inference::DiseaseClassifier;

#[derive(Debug, Clone)]
pub struct Diagnosis {
    pub label: DiseaseLabel,
    pub advisory: Advisory,
}

/// Disease detection service
#[derive(Clone)]
pub struct DiseaseService {
    classifier: Option<Arc<dyn DiseaseClassifier>>,
}

impl DiseaseService {
    pub fn new(classifier: Option<Arc<dyn DiseaseClassifier>>) -> Self {
        Self { classifier }
    }

    /// Classify an uploaded leaf image on the blocking pool
    pub async fn diagnose(&self, image: Vec<u8>) -> AppResult<Diagnosis> {
        let classifier = self
            .classifier
            .clone()
            .ok_or(AppError::ModelUnavailable("disease detection model"))?;

        let label = tokio::task::spawn_blocking(move || classifier.classify(&image))
            .await?
            .map_err(AppError::ImageRejected)?;

        tracing::info!("Diagnosed {}", label.as_str());

        Ok(Diagnosis {
            label,
            advisory: disease_remedy(label),
        })
    }
}
