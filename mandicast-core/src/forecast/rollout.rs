//! Rollout state — one step of the recursive forecast as an immutable fold.
//!
//! The predictor is trained for one-step-ahead prediction only. To reach a
//! multi-day horizon, each prediction is fed back in as the next step's
//! lag-1 input: state_0 → state_1 → … → state_h, producing one
//! (prediction, next_state) pair per step. Prediction errors compound
//! additively across steps; that is an accepted, documented limitation of
//! the approach, not a bug.

use crate::domain::FeatureRow;
use crate::predictor::Predictor;

/// Feature vector state at one point in the rollout.
///
/// `advance` returns a new state rather than mutating, so every
/// intermediate step is independently inspectable and testable.
#[derive(Debug, Clone, PartialEq)]
pub struct RolloutState {
    row: FeatureRow,
}

impl RolloutState {
    /// Start a rollout from the most recent feature row.
    pub fn new(latest: FeatureRow) -> Self {
        Self { row: latest }
    }

    /// The feature row a predictor sees at this step.
    pub fn features(&self) -> &FeatureRow {
        &self.row
    }

    /// Fold one prediction into the state for the next step.
    ///
    /// Lags shift down (7 ← 3, 3 ← 1, 1 ← pred) and the moving averages
    /// absorb the prediction exponentially:
    /// `ma_7' = (ma_7·6 + pred) / 7`, `ma_14' = (ma_14·13 + pred) / 14`.
    /// Exogenous columns (MSP, flags, arrivals, rainfall) are held constant
    /// across the horizon — the model has no exogenous forecast of its own.
    pub fn advance(&self, pred: f64) -> RolloutState {
        let mut row = self.row.clone();
        row.price_lag_7 = row.price_lag_3;
        row.price_lag_3 = row.price_lag_1;
        row.price_lag_1 = pred;
        row.price_ma_7 = (row.price_ma_7 * 6.0 + pred) / 7.0;
        row.price_ma_14 = (row.price_ma_14 * 13.0 + pred) / 14.0;
        row.price_trend = row.price_ma_7 - row.price_ma_14;
        Self { row }
    }
}

/// Run the full rollout: `horizon` predictions, each paired with the state
/// that follows it. Raw (unrounded) predictions propagate into later steps.
pub fn rollout(
    start: RolloutState,
    predictor: &dyn Predictor,
    horizon: usize,
) -> Vec<(f64, RolloutState)> {
    let mut steps = Vec::with_capacity(horizon);
    let mut state = start;
    for _ in 0..horizon {
        let pred = predictor.predict(state.features());
        let next = state.advance(pred);
        steps.push((pred, next.clone()));
        state = next;
    }
    steps
}
