//! FeatureRow — a model-ready observation derived from the raw series.

use serde::{Deserialize, Serialize};

use super::PricePoint;

/// Length of the feature vector consumed by predictors.
pub const FEATURE_COUNT: usize = 16;

/// One row of the feature matrix: the originating price point plus the
/// derived lag, moving-average, and trend columns.
///
/// Only rows with a full lookback window exist — the feature builder drops
/// anything with an undefined derived column, so every field here is always
/// populated. Computed fresh from the full history on each request; never
/// persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub point: PricePoint,
    /// Price 1 day before this row.
    pub price_lag_1: f64,
    /// Price 3 days before this row.
    pub price_lag_3: f64,
    /// Price 7 days before this row.
    pub price_lag_7: f64,
    /// Trailing 7-day mean price, inclusive of this day.
    pub price_ma_7: f64,
    /// Trailing 14-day mean price, inclusive of this day.
    pub price_ma_14: f64,
    /// MA_7 − MA_14. Positive when the short average is above the long.
    pub price_trend: f64,
    /// Trailing 7-day mean of daily arrivals.
    pub arrival_ma_7: f64,
    /// Trailing 7-day mean of rainfall deviation.
    pub rain_7d_avg: f64,
}

impl FeatureRow {
    /// The ordered feature vector the predictor contract is trained against.
    ///
    /// Order is part of the predictor contract and must not change:
    /// exogenous columns first, then lags, then rolling columns.
    pub fn vector(&self) -> [f64; FEATURE_COUNT] {
        let p = &self.point;
        [
            p.msp,
            flag(p.procurement_season_flag),
            flag(p.export_ban_flag),
            p.fci_stock_lmt,
            p.daily_arrivals,
            p.rainfall_deviation_pct,
            flag(p.festival_season_flag),
            p.fertilizer_price_index,
            self.price_lag_1,
            self.price_lag_3,
            self.price_lag_7,
            self.price_ma_7,
            self.price_ma_14,
            self.price_trend,
            self.arrival_ma_7,
            self.rain_7d_avg,
        ]
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}
