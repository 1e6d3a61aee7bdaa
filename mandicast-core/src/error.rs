//! Core error taxonomy.
//!
//! All core errors are recoverable at the call boundary: a forecast request
//! fails cleanly with no partial result and the caller translates the error
//! into a user-facing response. The core never terminates the process.

use thiserror::Error;

/// Errors from feature building and forecasting.
#[derive(Debug, Clone, Error)]
pub enum ForecastError {
    /// Fewer than the minimum required rows survive feature filtering.
    #[error("not enough data to build features (need at least one full 14-day window)")]
    InsufficientData,

    /// The feature matrix is too short to forecast from (fewer than 30 rows).
    #[error("not enough history to generate a prediction for '{commodity}'")]
    InsufficientHistory { commodity: String },
}
