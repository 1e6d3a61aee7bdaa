//! Forecasting — recursive single-step rollout over a multi-day horizon.

mod engine;
mod rollout;

pub use engine::{forecast, DEFAULT_HORIZON, MIN_FEATURE_ROWS};
pub use rollout::{rollout, RolloutState};
