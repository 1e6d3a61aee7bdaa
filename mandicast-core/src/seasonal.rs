//! Seasonal outlook — fixed calendar of supply-side price pressure.
//!
//! Indian crop cycles drive predictable supply swings: Rabi harvest arrivals
//! depress prices through late winter and spring, monsoon withdrawal
//! tightens supply toward autumn. The table below is a fixed domain
//! calendar, not derived from data; changing it is a deliberate policy
//! edit, not a bug fix.

use chrono::{Datelike, NaiveDate};

use crate::domain::{SeasonalOutlook, SeasonalTrend};

/// Look up the seasonal outlook for a date's calendar month.
pub fn seasonal_outlook(date: NaiveDate) -> SeasonalOutlook {
    match date.month() {
        1 | 2 => SeasonalOutlook {
            trend: SeasonalTrend::Bearish,
            time_horizon: "3–6 weeks".into(),
            reason: "Rabi harvest approaching, supply likely to increase".into(),
        },
        3 | 4 => SeasonalOutlook {
            trend: SeasonalTrend::Bearish,
            time_horizon: "current".into(),
            reason: "Active harvest season, high arrivals".into(),
        },
        8 | 9 => SeasonalOutlook {
            trend: SeasonalTrend::Bullish,
            time_horizon: "2–4 weeks".into(),
            reason: "Monsoon withdrawal, supply tightening expected".into(),
        },
        _ => SeasonalOutlook {
            trend: SeasonalTrend::Neutral,
            time_horizon: "near term".into(),
            reason: "No major seasonal transition".into(),
        },
    }
}
