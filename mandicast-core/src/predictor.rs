//! Predictor — the opaque single-step regression capability.
//!
//! The core treats the trained model as a black box satisfying one contract:
//! given a feature row, return the next-day price. Loading, training, and
//! persistence all live outside this crate; the runner injects a concrete
//! implementation keyed by commodity name.

use crate::domain::FeatureRow;

/// A pre-trained single-step price regressor.
///
/// `Send + Sync` so forecasts for different commodities can run in parallel.
pub trait Predictor: Send + Sync {
    /// Predict the next day's price from one feature row.
    fn predict(&self, features: &FeatureRow) -> f64;
}

/// Predictor that always returns the same price. Test and smoke-check stub.
#[derive(Debug, Clone, Copy)]
pub struct ConstantPredictor(pub f64);

impl Predictor for ConstantPredictor {
    fn predict(&self, _features: &FeatureRow) -> f64 {
        self.0
    }
}

/// Predictor that echoes yesterday's price (lag-1 persistence baseline).
#[derive(Debug, Clone, Copy)]
pub struct PersistencePredictor;

impl Predictor for PersistencePredictor {
    fn predict(&self, features: &FeatureRow) -> f64 {
        features.price_lag_1
    }
}
