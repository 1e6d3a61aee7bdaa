//! Synthetic history generation — seeded random walks shaped like the
//! dataset.
//!
//! Developer/demo tool: produces a plausible per-commodity series so the
//! whole pipeline can run without the real dataset. Deterministic for a
//! given (commodity, days, seed) triple.

use chrono::{Datelike, Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mandicast_core::domain::{round2, PricePoint};

/// Generate `days` of synthetic history ending today.
pub fn synthetic_history(commodity: &str, days: usize, seed: u64) -> Vec<PricePoint> {
    let end = Utc::now().date_naive();
    let start = end - Days::new(days.saturating_sub(1) as u64);
    synthetic_history_from(commodity, start, days, seed)
}

/// Generate `days` of synthetic history starting at `start`.
pub fn synthetic_history_from(
    commodity: &str,
    start: NaiveDate,
    days: usize,
    seed: u64,
) -> Vec<PricePoint> {
    let mut rng = StdRng::seed_from_u64(seed);

    // Base levels loosely calibrated to wheat-like numbers.
    let msp = 2275.0;
    let mut price: f64 = msp * (1.0 + rng.gen_range(-0.05..0.15));
    let mut arrivals: f64 = rng.gen_range(600.0..1400.0);

    (0..days)
        .map(|i| {
            let date = start + Days::new(i as u64);
            let month = date.month();

            // Harvest months push prices down, lean months up.
            let seasonal_drift = match month {
                1..=4 => -0.4,
                8 | 9 => 0.5,
                _ => 0.0,
            };
            price += seasonal_drift + rng.gen_range(-6.0..6.0);
            price = price.max(msp * 0.7);

            arrivals += rng.gen_range(-40.0..40.0);
            arrivals = arrivals.clamp(300.0, 2500.0);

            PricePoint {
                date,
                commodity: commodity.to_string(),
                daily_price: round2(price),
                daily_arrivals: round2(arrivals),
                rainfall_deviation_pct: round2(rng.gen_range(-15.0..15.0)),
                msp,
                fci_stock_lmt: round2(250.0 + rng.gen_range(-30.0..30.0)),
                fertilizer_price_index: round2(100.0 + rng.gen_range(-5.0..8.0)),
                procurement_season_flag: matches!(month, 4..=6),
                export_ban_flag: false,
                festival_season_flag: matches!(month, 10 | 11),
            }
        })
        .collect()
}
