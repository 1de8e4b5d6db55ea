//! Business logic services

pub mod crop;
pub mod disease;
pub mod fertilizer;

pub use crop::{CropRecommendation, CropService};
pub use disease::{Diagnosis, DiseaseService};
pub use fertilizer::{FertilizerRecommendation, FertilizerService};
