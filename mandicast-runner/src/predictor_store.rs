//! Predictor store — per-commodity model files, loaded by name.
//!
//! A model is a JSON file `<models_dir>/<Commodity>.json` holding a linear
//! single-step regressor: an intercept and one weight per feature column.
//! The core only ever sees the loaded model through the `Predictor` trait;
//! training and any richer model format live outside this system.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mandicast_core::domain::{FeatureRow, FEATURE_COUNT};
use mandicast_core::predictor::Predictor;

/// Errors from model loading.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("no trained model for commodity '{commodity}'")]
    PredictorUnavailable { commodity: String },

    #[error("model file {path} is invalid: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// A linear single-step price model.
///
/// `predict` is the dot product of the feature vector and `weights`, plus
/// `intercept`. Weight order matches `FeatureRow::vector`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearPredictor {
    pub intercept: f64,
    pub weights: Vec<f64>,
}

impl LinearPredictor {
    /// Lag-1 persistence baseline: tomorrow's price = today's price.
    /// Written by the demo seeder so the pipeline runs end to end.
    pub fn persistence_baseline() -> Self {
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[8] = 1.0; // price_lag_1
        Self {
            intercept: 0.0,
            weights,
        }
    }
}

impl Predictor for LinearPredictor {
    fn predict(&self, features: &FeatureRow) -> f64 {
        let v = features.vector();
        self.intercept
            + v.iter()
                .zip(&self.weights)
                .map(|(x, w)| x * w)
                .sum::<f64>()
    }
}

/// Lookup-by-name store over a directory of model files.
#[derive(Debug, Clone)]
pub struct PredictorStore {
    models_dir: PathBuf,
}

impl PredictorStore {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    fn model_path(&self, commodity: &str) -> PathBuf {
        self.models_dir.join(format!("{commodity}.json"))
    }

    /// Load the model for a commodity, by file name.
    pub fn load(&self, commodity: &str) -> Result<LinearPredictor, PredictorError> {
        let path = self.model_path(commodity);
        let text = std::fs::read_to_string(&path).map_err(|_| {
            PredictorError::PredictorUnavailable {
                commodity: commodity.to_string(),
            }
        })?;
        let model: LinearPredictor =
            serde_json::from_str(&text).map_err(|e| PredictorError::Invalid {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        if model.weights.len() != FEATURE_COUNT {
            return Err(PredictorError::Invalid {
                path,
                reason: format!(
                    "expected {FEATURE_COUNT} weights, found {}",
                    model.weights.len()
                ),
            });
        }
        Ok(model)
    }

    /// Persist a model under the commodity's name.
    pub fn save(&self, commodity: &str, model: &LinearPredictor) -> Result<(), PredictorError> {
        std::fs::create_dir_all(&self.models_dir).map_err(|e| PredictorError::Invalid {
            path: self.models_dir.clone(),
            reason: e.to_string(),
        })?;
        let path = self.model_path(commodity);
        let json = serde_json::to_string_pretty(model).map_err(|e| PredictorError::Invalid {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        std::fs::write(&path, json).map_err(|e| PredictorError::Invalid {
            path,
            reason: e.to_string(),
        })
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }
}
