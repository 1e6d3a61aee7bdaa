//! PricePoint — one observed market day for one commodity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single historical observation: the daily mandi price plus the exogenous
/// signals recorded alongside it.
///
/// One per (commodity, date). Immutable once ingested; the core derives
/// features from sequences of these but never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub commodity: String,
    /// Wholesale market price (the prediction target).
    pub daily_price: f64,
    /// Quantity arriving at the mandi, in tonnes.
    pub daily_arrivals: f64,
    /// Rainfall deviation from the seasonal norm, percent.
    pub rainfall_deviation_pct: f64,
    /// Minimum Support Price, the government floor.
    pub msp: f64,
    /// Central pool stock, lakh metric tonnes.
    pub fci_stock_lmt: f64,
    pub fertilizer_price_index: f64,
    pub procurement_season_flag: bool,
    pub export_ban_flag: bool,
    pub festival_season_flag: bool,
}

impl PricePoint {
    /// True when every numeric field is finite. Rows failing this are not
    /// usable as feature inputs.
    pub fn is_sane(&self) -> bool {
        self.daily_price.is_finite()
            && self.daily_price > 0.0
            && self.daily_arrivals.is_finite()
            && self.rainfall_deviation_pct.is_finite()
            && self.msp.is_finite()
            && self.fci_stock_lmt.is_finite()
            && self.fertilizer_price_index.is_finite()
    }
}
