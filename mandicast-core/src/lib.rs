//! MandiCast Core — domain types, feature engineering, forecasting, exit signals.
//!
//! This crate contains the algorithmic heart of the advisory pipeline:
//! - Domain types (price points, feature rows, forecast results, decisions)
//! - Feature builder: lag / moving-average / trend columns from a raw series
//! - Forecast engine: recursive single-step rollout over a 7-day horizon
//! - Exit-signal engine: ordered HOLD/SELL decision table
//! - Seasonal outlook: fixed calendar of supply-side pressure
//!
//! Everything here is a pure computation over an in-memory series. I/O
//! (history files, model loading, audit logs, notifications) lives behind
//! trait seams implemented by the runner crate.

pub mod audit;
pub mod domain;
pub mod error;
pub mod exit_signal;
pub mod features;
pub mod forecast;
pub mod predictor;
pub mod seasonal;

pub use audit::{AuditRecord, AuditSink, NoopAudit};
pub use error::ForecastError;
pub use exit_signal::{decide_exit_signal, MIN_HORIZON_DAYS};
pub use features::build_features;
pub use forecast::{forecast, RolloutState, DEFAULT_HORIZON, MIN_FEATURE_ROWS};
pub use predictor::Predictor;
pub use seasonal::seasonal_outlook;
