//! Domain types for the advisory pipeline.

mod decision;
mod feature_row;
mod forecast_result;
mod price_point;
mod seasonal_outlook;

pub use decision::{ExitDecision, ExitSignal};
pub use feature_row::{FeatureRow, FEATURE_COUNT};
pub use forecast_result::{
    ConfidenceBand, ForecastResult, HistoricalComparison, VolatilityLevel,
};
pub use price_point::PricePoint;
pub use seasonal_outlook::{SeasonalOutlook, SeasonalTrend};

/// Round to 2 decimal places, the precision of all reported prices and
/// percentages.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
