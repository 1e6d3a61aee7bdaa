//! Audit sink — best-effort record of every forecast call.
//!
//! The forecast engine emits one flat record per call to an append-only log
//! collaborator. Logging is a side effect, not part of the returned value:
//! a failing sink must never fail the forecast, so `forecast` swallows
//! append errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{SeasonalTrend, VolatilityLevel};

/// One row of the prediction audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub commodity: String,
    /// Last actual price in the history, 2 decimals.
    pub last_price: f64,
    /// Mean of the 7 predictions, 2 decimals.
    pub avg_7day_prediction: f64,
    pub volatility_level: VolatilityLevel,
    pub seasonal_trend: SeasonalTrend,
    pub weekly_change_pct: f64,
}

/// Append-only destination for audit records.
pub trait AuditSink: Send + Sync {
    /// Append one record. Callers treat failure as best-effort.
    fn append(&self, record: &AuditRecord) -> Result<(), std::io::Error>;
}

/// Sink that discards every record. Default for tests and pure callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAudit;

impl AuditSink for NoopAudit {
    fn append(&self, _record: &AuditRecord) -> Result<(), std::io::Error> {
        Ok(())
    }
}
