//! Exit-signal engine — ordered HOLD/SELL decision table.
//!
//! The rules are evaluated in strict priority order and the first match
//! wins. The conditions are NOT mutually exclusive, so the order is part of
//! the behavior: reordering silently changes decisions in overlapping cases.
//! Do not simplify this into an unordered rule set.

use crate::domain::{ExitDecision, ForecastResult, SeasonalTrend, VolatilityLevel};

/// Minimum remaining upside (percent) below which holding is pointless.
const MIN_UPSIDE_PCT: f64 = 2.0;

/// Shortest horizon the decision table is defined for: the momentum rule
/// compares the last day against the value two days prior, so anything
/// below 3 days has no such pair. Config loading enforces this floor.
pub const MIN_HORIZON_DAYS: usize = 3;

/// Decide whether a committed quantity should be held or sold now.
///
/// Rule order:
/// 1. Last predicted day below the value two days prior → momentum weakening
/// 2. Bearish seasonal trend
/// 3. Remaining upside to the forecast peak under 2%
/// 4. High volatility while the last day sits below the peak
/// 5. Otherwise hold
///
/// The momentum rule compares day 7 against day 5, two days back rather
/// than one; the wider offset smooths single-day noise.
pub fn decide_exit_signal(forecast: &ForecastResult) -> ExitDecision {
    let horizon = forecast.forecast_days.len();
    let last = forecast.last_day();
    let peak = forecast.peak();
    // Measured to the peak wherever it falls in the horizon, before or
    // after the last day. The peak includes the last day, so this is ≥ 0.
    let upside_pct = (peak - last) / last * 100.0;

    if last < forecast.day(horizon - 2) {
        return ExitDecision::sell("Short-term momentum weakening");
    }

    if forecast.seasonal_outlook.trend == SeasonalTrend::Bearish {
        return ExitDecision::sell("Seasonal demand expected to weaken");
    }

    if upside_pct < MIN_UPSIDE_PCT {
        return ExitDecision::sell("Limited upside remaining");
    }

    if forecast.confidence_band.volatility_level == VolatilityLevel::High && last < peak {
        return ExitDecision::sell("High volatility with weak trend");
    }

    ExitDecision::hold("Trend remains favorable")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConfidenceBand, ExitSignal, HistoricalComparison, SeasonalOutlook,
    };
    use chrono::Utc;

    fn make_forecast(
        days: Vec<f64>,
        trend: SeasonalTrend,
        volatility: VolatilityLevel,
    ) -> ForecastResult {
        let low = days.iter().copied().fold(f64::MAX, f64::min);
        let high = days.iter().copied().fold(f64::MIN, f64::max);
        ForecastResult {
            commodity: "Rice".into(),
            generated_on: Utc::now(),
            forecast_days: days,
            confidence_band: ConfidenceBand {
                lower_bound: low - 5.0,
                upper_bound: high + 5.0,
                volatility_level: volatility,
            },
            historical_comparison: HistoricalComparison {
                vs_last_week_pct: 0.0,
                vs_last_year_pct: None,
            },
            seasonal_outlook: SeasonalOutlook {
                trend,
                time_horizon: "near term".into(),
                reason: "No major seasonal transition".into(),
            },
        }
    }

    #[test]
    fn momentum_rule_wins_over_everything() {
        // day_7 < day_5, but every later rule points at HOLD: bullish
        // season, 10% upside, low volatility.
        let days = vec![100.0, 101.0, 102.0, 103.0, 110.0, 105.0, 100.0];
        let f = make_forecast(days, SeasonalTrend::Bullish, VolatilityLevel::Low);
        let d = decide_exit_signal(&f);
        assert_eq!(d.signal, ExitSignal::Sell);
        assert_eq!(d.reason, "Short-term momentum weakening");
    }

    #[test]
    fn bearish_season_sells_when_momentum_holds() {
        // Rising tail (day_7 > day_5) so rule 1 passes; bearish season
        // catches it at rule 2 before the upside check ever runs.
        let days = vec![100.0, 102.0, 108.0, 110.0, 101.0, 102.0, 103.0];
        let f = make_forecast(days, SeasonalTrend::Bearish, VolatilityLevel::Low);
        let d = decide_exit_signal(&f);
        assert_eq!(d.signal, ExitSignal::Sell);
        assert_eq!(d.reason, "Seasonal demand expected to weaken");
    }

    #[test]
    fn limited_upside_sells() {
        // Flat-rising tail, neutral season, peak barely above last day.
        let days = vec![100.0, 100.5, 101.0, 101.2, 101.3, 101.4, 101.5];
        let f = make_forecast(days, SeasonalTrend::Neutral, VolatilityLevel::Low);
        let d = decide_exit_signal(&f);
        assert_eq!(d.signal, ExitSignal::Sell);
        assert_eq!(d.reason, "Limited upside remaining");
    }

    #[test]
    fn day_one_peak_with_declining_tail_sells_on_momentum() {
        // Peak on day 1 and a monotone decline after it: the momentum rule
        // fires before the upside computation matters.
        let days = vec![120.0, 110.0, 108.0, 106.0, 104.0, 103.0, 102.0];
        let f = make_forecast(days, SeasonalTrend::Neutral, VolatilityLevel::Low);
        let d = decide_exit_signal(&f);
        assert_eq!(d.signal, ExitSignal::Sell);
        assert_eq!(d.reason, "Short-term momentum weakening");
    }

    #[test]
    fn high_volatility_below_peak_sells() {
        // Momentum fine, neutral season, 4% upside, high volatility.
        let days = vec![100.0, 101.0, 104.0, 102.0, 100.0, 100.5, 101.0];
        let f = make_forecast(days, SeasonalTrend::Neutral, VolatilityLevel::High);
        let d = decide_exit_signal(&f);
        assert_eq!(d.signal, ExitSignal::Sell);
        assert_eq!(d.reason, "High volatility with weak trend");
    }

    #[test]
    fn three_day_horizon_is_the_decision_floor() {
        // At exactly MIN_HORIZON_DAYS the momentum rule compares the last
        // day against day 1; shorter forecasts are rejected upstream.
        let days = vec![104.0, 102.0, 103.0];
        let f = make_forecast(days, SeasonalTrend::Neutral, VolatilityLevel::Low);
        let d = decide_exit_signal(&f);
        assert_eq!(d.signal, ExitSignal::Sell);
        assert_eq!(d.reason, "Short-term momentum weakening");
    }

    #[test]
    fn favorable_trend_holds() {
        // Rising day_7 ≥ day_5, neutral season, ~5% upside, low volatility.
        let days = vec![100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0];
        let mut f = make_forecast(days, SeasonalTrend::Neutral, VolatilityLevel::Low);
        f.forecast_days[3] = 111.0; // peak mid-horizon, upside ≈ 4.7%
        let d = decide_exit_signal(&f);
        assert_eq!(d.signal, ExitSignal::Hold);
        assert_eq!(d.reason, "Trend remains favorable");
    }

    #[test]
    fn last_day_peak_never_reaches_the_volatility_rule() {
        // Last day IS the peak, so upside = 0 and rule 3 fires first even
        // though volatility is high. Rule 4's "below peak" guard would have
        // failed anyway.
        let days = vec![100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0];
        let f = make_forecast(days, SeasonalTrend::Neutral, VolatilityLevel::High);
        let d = decide_exit_signal(&f);
        assert_eq!(d.signal, ExitSignal::Sell);
        assert_eq!(d.reason, "Limited upside remaining");
    }
}
