//! Random forest crop classifier
//!
//! The trained scikit-learn forest is exported to JSON with the same
//! parallel arrays scikit-learn keeps in each estimator's `tree_`:
//! `children_left`, `children_right`, `feature`, `threshold` and `value`.

use std::path::Path;

use serde::Deserialize;
use shared::{FeatureVector, FEATURE_COUNT};

use super::{CropClassifier, ModelError};

/// Marker used by scikit-learn for "no child"
const LEAF: i64 = -1;

/// One decision tree in scikit-learn's array layout
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

/// Exported forest document
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    pub classes: Vec<String>,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, index: usize, classes: usize) -> Result<(), String> {
        let nodes = self.node_count();
        if nodes == 0 {
            return Err(format!("tree {index} has no nodes"));
        }
        if self.children_right.len() != nodes
            || self.feature.len() != nodes
            || self.threshold.len() != nodes
            || self.value.len() != nodes
        {
            return Err(format!("tree {index} has arrays of different lengths"));
        }

        for node in 0..nodes {
            let left = self.children_left[node];
            let right = self.children_right[node];
            if left == LEAF {
                if self.value[node].len() != classes {
                    return Err(format!(
                        "tree {index} leaf {node} has {} values for {classes} classes",
                        self.value[node].len()
                    ));
                }
                continue;
            }

            let in_range = |child: i64| child > node as i64 && (child as usize) < nodes;
            if !in_range(left) || !in_range(right) {
                return Err(format!("tree {index} node {node} has a child out of range"));
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= FEATURE_COUNT {
                return Err(format!("tree {index} node {node} splits on feature {feature}"));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf and return its class distribution
    fn leaf_distribution(&self, x: &[f64]) -> &[f64] {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        &self.value[node]
    }
}

impl RandomForest {
    /// Load and validate an exported forest
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ModelError::load(path, e))?;
        let forest: RandomForest =
            serde_json::from_str(&raw).map_err(|e| ModelError::load(path, e))?;
        forest.validate().map_err(|reason| ModelError::load(path, reason))?;
        Ok(forest)
    }

    /// Check structural invariants so prediction can index without bounds failures
    pub fn validate(&self) -> Result<(), String> {
        if self.n_features != FEATURE_COUNT {
            return Err(format!(
                "expected {FEATURE_COUNT} features, found {}",
                self.n_features
            ));
        }
        if self.classes.is_empty() {
            return Err("forest has no classes".to_string());
        }
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(index, self.classes.len())?;
        }
        Ok(())
    }

    /// Averaged class probabilities over all trees
    pub fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        let mut totals = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.leaf_distribution(x);
            let sum: f64 = leaf.iter().sum();
            if sum <= 0.0 {
                continue;
            }
            for (total, weight) in totals.iter_mut().zip(leaf) {
                *total += weight / sum;
            }
        }

        let trees = self.trees.len() as f64;
        totals.iter_mut().for_each(|total| *total /= trees);
        totals
    }
}

impl CropClassifier for RandomForest {
    fn predict(&self, features: &FeatureVector) -> Result<String, ModelError> {
        let probabilities = self.predict_proba(features.as_slice());

        let mut best = 0usize;
        for (index, probability) in probabilities.iter().enumerate() {
            if *probability > probabilities[best] {
                best = index;
            }
        }

        self.classes
            .get(best)
            .cloned()
            .ok_or(ModelError::UnknownClass(best))
    }
}
