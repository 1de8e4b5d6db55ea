//! Model inference for crop recommendation and leaf disease detection
//!
//! Both models are loaded once at startup. Handlers only ever see them
//! through the object-safe traits below, so a missing artifact is an
//! `Option::None` in [`crate::AppState`] rather than a crash.

use shared::{DiseaseLabel, FeatureVector};
use thiserror::Error;

pub mod forest;
pub mod preprocess;
pub mod resnet;

pub use forest::RandomForest;
pub use resnet::ResNetClassifier;

/// Failures while loading or running a model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to load model from {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("unsupported image shape {width}x{height} after resizing")]
    UnsupportedShape { width: u32, height: u32 },

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model produced unknown class index {0}")]
    UnknownClass(usize),
}

impl ModelError {
    pub(crate) fn load(path: &std::path::Path, reason: impl ToString) -> Self {
        ModelError::Load {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Tabular classifier over the seven ordered crop features
pub trait CropClassifier: Send + Sync {
    /// Predict the best crop label for one feature vector
    fn predict(&self, features: &FeatureVector) -> Result<String, ModelError>;
}

/// Image classifier over raw uploaded bytes
pub trait DiseaseClassifier: Send + Sync {
    /// Decode, preprocess and classify a leaf image
    fn classify(&self, image_bytes: &[u8]) -> Result<DiseaseLabel, ModelError>;
}

/// Index of the largest score, first index on ties
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().enumerate() {
        match best {
            Some((_, top)) if score <= top => {}
            _ if score.is_nan() => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_first_on_ties() {
        assert_eq!(argmax(&[0.1, 0.7, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[3.0]), Some(0));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_argmax_skips_nan() {
        assert_eq!(argmax(&[f32::NAN, -1.0, 2.0]), Some(2));
        assert_eq!(argmax(&[f32::NAN]), None);
    }

    #[test]
    fn test_argmax_negative_scores() {
        assert_eq!(argmax(&[-5.0, -0.5, -3.0]), Some(1));
    }
}
