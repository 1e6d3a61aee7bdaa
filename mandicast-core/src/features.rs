//! Feature builder — raw price series to model-ready feature matrix.
//!
//! Derived columns per row:
//! - Price lags at offsets 1, 3, 7
//! - Trailing means MA_7 / MA_14 (inclusive of the current day)
//! - Trend = MA_7 − MA_14
//! - Trailing 7-day means of arrivals and rainfall deviation
//!
//! Rows with any undefined derived column are dropped, so the first 13 rows
//! of every series never appear in the output (MA_14 is the longest
//! lookback). Pure function of the input sequence; sorting by date is done
//! here, not assumed of the caller.

use crate::domain::{FeatureRow, PricePoint};
use crate::error::ForecastError;

/// Longest trailing window any derived column needs.
const MAX_LOOKBACK: usize = 14;

/// Build the feature matrix for one commodity's price series.
///
/// Fails with `InsufficientData` when no row survives filtering. Callers
/// that forecast enforce a stronger minimum on top of this.
pub fn build_features(series: &[PricePoint]) -> Result<Vec<FeatureRow>, ForecastError> {
    let mut sorted: Vec<&PricePoint> = series.iter().collect();
    sorted.sort_by_key(|p| p.date);

    if sorted.len() < MAX_LOOKBACK {
        return Err(ForecastError::InsufficientData);
    }

    let mut rows = Vec::with_capacity(sorted.len() - (MAX_LOOKBACK - 1));
    for i in (MAX_LOOKBACK - 1)..sorted.len() {
        let p = sorted[i];
        let ma_7 = trailing_mean(&sorted, i, 7, |p| p.daily_price);
        let ma_14 = trailing_mean(&sorted, i, 14, |p| p.daily_price);

        rows.push(FeatureRow {
            point: p.clone(),
            price_lag_1: sorted[i - 1].daily_price,
            price_lag_3: sorted[i - 3].daily_price,
            price_lag_7: sorted[i - 7].daily_price,
            price_ma_7: ma_7,
            price_ma_14: ma_14,
            price_trend: ma_7 - ma_14,
            arrival_ma_7: trailing_mean(&sorted, i, 7, |p| p.daily_arrivals),
            rain_7d_avg: trailing_mean(&sorted, i, 7, |p| p.rainfall_deviation_pct),
        });
    }

    if rows.is_empty() {
        return Err(ForecastError::InsufficientData);
    }
    Ok(rows)
}

/// Mean of `field` over the `window` points ending at index `i`, inclusive.
fn trailing_mean(
    sorted: &[&PricePoint],
    i: usize,
    window: usize,
    field: impl Fn(&PricePoint) -> f64,
) -> f64 {
    let slice = &sorted[i + 1 - window..=i];
    slice.iter().map(|p| field(p)).sum::<f64>() / window as f64
}
