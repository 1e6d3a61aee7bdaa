//! SeasonalOutlook — qualitative supply-side outlook for a calendar month.

use serde::{Deserialize, Serialize};

/// Direction of expected seasonal price pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalTrend {
    Bullish,
    Bearish,
    Neutral,
}

impl SeasonalTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonalTrend::Bullish => "bullish",
            SeasonalTrend::Bearish => "bearish",
            SeasonalTrend::Neutral => "neutral",
        }
    }
}

/// Trend direction, the window it applies over, and a farmer-readable reason.
/// Pure function of the calendar month (see `seasonal::seasonal_outlook`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalOutlook {
    pub trend: SeasonalTrend,
    pub time_horizon: String,
    pub reason: String,
}
