//! ForecastResult — the output of one forecast call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SeasonalOutlook;

/// Qualitative bucket for the trailing 14-day price volatility.
///
/// Thresholds are fixed design constants (see `VolatilityLevel::from_vol`),
/// not learned from data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityLevel {
    Low,
    Medium,
    High,
}

impl VolatilityLevel {
    /// Bucket a standard deviation of recent daily prices.
    pub fn from_vol(recent_vol: f64) -> Self {
        if recent_vol < 1.5 {
            VolatilityLevel::Low
        } else if recent_vol < 4.0 {
            VolatilityLevel::Medium
        } else {
            VolatilityLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityLevel::Low => "low",
            VolatilityLevel::Medium => "medium",
            VolatilityLevel::High => "high",
        }
    }
}

/// Uncertainty band around the 7-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub volatility_level: VolatilityLevel,
}

/// Recent price change context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalComparison {
    pub vs_last_week_pct: f64,
    /// None when the history is shorter than a year.
    pub vs_last_year_pct: Option<f64>,
}

/// A 7-day price forecast with confidence band, historical context, and
/// seasonal outlook. Constructed once per prediction call; immutable after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub commodity: String,
    pub generated_on: DateTime<Utc>,
    /// Predicted prices, index 0 = day 1. Always `horizon_days` long.
    pub forecast_days: Vec<f64>,
    pub confidence_band: ConfidenceBand,
    pub historical_comparison: HistoricalComparison,
    pub seasonal_outlook: SeasonalOutlook,
}

impl ForecastResult {
    /// Predicted price for a 1-based day number.
    ///
    /// Panics if `n` is 0 or beyond the horizon; the decision rules only
    /// ever index days that exist for a 7-day forecast.
    pub fn day(&self, n: usize) -> f64 {
        assert!(n >= 1 && n <= self.forecast_days.len(), "day out of range");
        self.forecast_days[n - 1]
    }

    /// Last-day forecast.
    pub fn last_day(&self) -> f64 {
        *self
            .forecast_days
            .last()
            .expect("forecast horizon is never empty")
    }

    /// Highest forecast across the horizon.
    pub fn peak(&self) -> f64 {
        self.forecast_days.iter().copied().fold(f64::MIN, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volatility_buckets() {
        assert_eq!(VolatilityLevel::from_vol(0.0), VolatilityLevel::Low);
        assert_eq!(VolatilityLevel::from_vol(1.49), VolatilityLevel::Low);
        assert_eq!(VolatilityLevel::from_vol(1.5), VolatilityLevel::Medium);
        assert_eq!(VolatilityLevel::from_vol(3.99), VolatilityLevel::Medium);
        assert_eq!(VolatilityLevel::from_vol(4.0), VolatilityLevel::High);
        assert_eq!(VolatilityLevel::from_vol(12.0), VolatilityLevel::High);
    }
}
