//! Forecast engine — feature matrix to ForecastResult.
//!
//! Orchestrates the pure pieces: builds features, rolls the predictor out
//! across the horizon, derives the confidence band from recent realized
//! volatility, attaches historical and seasonal context, and emits one
//! best-effort audit record.

use chrono::{Days, Utc};

use crate::audit::{AuditRecord, AuditSink};
use crate::domain::{
    round2, ConfidenceBand, FeatureRow, ForecastResult, HistoricalComparison, PricePoint,
    VolatilityLevel,
};
use crate::error::ForecastError;
use crate::features::build_features;
use crate::forecast::rollout::{rollout, RolloutState};
use crate::predictor::Predictor;
use crate::seasonal::seasonal_outlook;

/// Forecast horizon in days.
pub const DEFAULT_HORIZON: usize = 7;

/// Minimum surviving feature rows required to forecast.
pub const MIN_FEATURE_ROWS: usize = 30;

/// Trailing window (days) for the realized-volatility estimate.
const VOL_WINDOW: usize = 14;

/// Band half-width as a multiple of realized volatility.
const BAND_SIGMA: f64 = 1.5;

/// Produce an N-day forecast for one commodity's history.
///
/// Fails with `InsufficientHistory` when fewer than [`MIN_FEATURE_ROWS`]
/// rows survive feature filtering; the caller reports this and moves on,
/// nothing is partially produced. Deterministic for a deterministic
/// predictor, except for `generated_on`.
///
/// The audit append is best-effort: a failing sink is ignored.
pub fn forecast(
    history: &[PricePoint],
    predictor: &dyn Predictor,
    horizon_days: usize,
    audit: &dyn AuditSink,
) -> Result<ForecastResult, ForecastError> {
    let commodity = match history.last() {
        Some(p) => p.commodity.clone(),
        None => return Err(ForecastError::InsufficientData),
    };

    let rows = build_features(history).map_err(|_| ForecastError::InsufficientHistory {
        commodity: commodity.clone(),
    })?;
    if rows.len() < MIN_FEATURE_ROWS {
        return Err(ForecastError::InsufficientHistory { commodity });
    }

    let latest = rows.last().expect("rows is non-empty").clone();
    let steps = rollout(RolloutState::new(latest.clone()), predictor, horizon_days);
    let raw_preds: Vec<f64> = steps.iter().map(|(pred, _)| *pred).collect();
    let forecast_days: Vec<f64> = raw_preds.iter().map(|&p| round2(p)).collect();

    let confidence_band = confidence_band(&rows, &raw_preds);
    let historical_comparison = historical_comparison(&rows);
    let outlook = seasonal_outlook(latest.point.date);

    let result = ForecastResult {
        commodity: commodity.clone(),
        generated_on: Utc::now(),
        forecast_days,
        confidence_band,
        historical_comparison,
        seasonal_outlook: outlook,
    };

    let record = AuditRecord {
        timestamp: result.generated_on,
        commodity,
        last_price: round2(latest.point.daily_price),
        avg_7day_prediction: round2(raw_preds.iter().sum::<f64>() / raw_preds.len() as f64),
        volatility_level: result.confidence_band.volatility_level,
        seasonal_trend: result.seasonal_outlook.trend,
        weekly_change_pct: result.historical_comparison.vs_last_week_pct,
    };
    // Best-effort: the log collaborator failing must not fail the forecast.
    let _ = audit.append(&record);

    Ok(result)
}

/// Band from the sample std-dev of the trailing 14 actual prices.
fn confidence_band(rows: &[FeatureRow], preds: &[f64]) -> ConfidenceBand {
    let tail: Vec<f64> = rows
        .iter()
        .rev()
        .take(VOL_WINDOW)
        .map(|r| r.point.daily_price)
        .collect();
    let recent_vol = sample_std(&tail);
    let band_width = BAND_SIGMA * recent_vol;

    let min = preds.iter().copied().fold(f64::MAX, f64::min);
    let max = preds.iter().copied().fold(f64::MIN, f64::max);

    ConfidenceBand {
        lower_bound: round2(min - band_width),
        upper_bound: round2(max + band_width),
        volatility_level: VolatilityLevel::from_vol(recent_vol),
    }
}

/// Week-over-week and (when available) year-over-year change.
///
/// Both are computed over the feature-filtered rows. The weekly anchor is
/// the 7th row from the end; the yearly anchor is the latest row dated at
/// least 365 days before the last one, or None when the history is shorter.
fn historical_comparison(rows: &[FeatureRow]) -> HistoricalComparison {
    let last = rows.last().expect("rows is non-empty");
    let last_price = last.point.daily_price;
    let week_ago = &rows[rows.len() - DEFAULT_HORIZON];

    let vs_last_week_pct = round2(pct_change(week_ago.point.daily_price, last_price));

    let anchor = last.point.date - Days::new(365);
    let vs_last_year_pct = rows
        .iter()
        .rev()
        .find(|r| r.point.date <= anchor)
        .map(|r| round2(pct_change(r.point.daily_price, last_price)));

    HistoricalComparison {
        vs_last_week_pct,
        vs_last_year_pct,
    }
}

fn pct_change(from: f64, to: f64) -> f64 {
    (to - from) / from * 100.0
}

/// Sample standard deviation (n − 1 denominator). Zero for n < 2.
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    var.sqrt()
}
