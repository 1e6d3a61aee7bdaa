//! Observer sweep — periodic HOLD/SELL check over all active commitments.
//!
//! One sweep:
//! 1. Load the ledger and collect the distinct commodities of active rows.
//! 2. Forecast each commodity once, in parallel — commodities are fully
//!    independent, so the fan-out shares nothing mutable.
//! 3. Apply decisions sequentially: update signals, notify on transitions,
//!    settle SELLs at the latest recorded price.
//! 4. Write the ledger back once.
//!
//! A failure for one commodity (missing history, missing model, short
//! series) is collected into the outcome and never aborts the sweep.

use std::collections::HashMap;

use rayon::prelude::*;

use mandicast_core::audit::AuditSink;
use mandicast_core::domain::{ExitSignal, ForecastResult};
use mandicast_core::{decide_exit_signal, forecast};

use crate::history::CsvHistory;
use crate::ledger::{settle, CommitmentStatus, Ledger, LedgerError};
use crate::notify::Notifier;
use crate::predictor_store::PredictorStore;

/// What a sweep did, for reporting.
#[derive(Debug, Default)]
pub struct SweepOutcome {
    /// Active commitments examined.
    pub checked: usize,
    /// Notifications delivered (signal transitions).
    pub notified: usize,
    /// Commitments settled on SELL.
    pub settled: usize,
    /// Per-commodity or per-commitment failures, as (subject, error) pairs.
    pub errors: Vec<(String, String)>,
}

/// Run one observer sweep. See the module docs for the sequence.
pub fn observe_commitments(
    ledger: &Ledger,
    history: &CsvHistory,
    store: &PredictorStore,
    audit: &dyn AuditSink,
    notifier: &dyn Notifier,
    horizon_days: usize,
    fee_rate: f64,
) -> Result<SweepOutcome, LedgerError> {
    let mut commitments = ledger.load()?;
    let mut outcome = SweepOutcome::default();

    let mut commodities: Vec<String> = commitments
        .iter()
        .filter(|c| c.status == CommitmentStatus::Active)
        .map(|c| c.commodity.clone())
        .collect();
    commodities.sort();
    commodities.dedup();

    // Forecast every commodity once, in parallel.
    let forecasts: HashMap<String, Result<ForecastResult, String>> = commodities
        .par_iter()
        .map(|commodity| {
            let result = history
                .load_history(commodity)
                .map_err(|e| e.to_string())
                .and_then(|series| {
                    let model = store.load(commodity).map_err(|e| e.to_string())?;
                    forecast(&series, &model, horizon_days, audit).map_err(|e| e.to_string())
                });
            (commodity.clone(), result)
        })
        .collect();

    for (commodity, result) in &forecasts {
        if let Err(reason) = result {
            outcome.errors.push((commodity.clone(), reason.clone()));
        }
    }

    for commitment in &mut commitments {
        if commitment.status != CommitmentStatus::Active {
            continue;
        }
        outcome.checked += 1;

        let Some(Ok(market)) = forecasts.get(&commitment.commodity) else {
            continue;
        };
        let decision = decide_exit_signal(market);

        if decision.signal != commitment.current_signal {
            commitment.current_signal = decision.signal;
            commitment.last_notified_signal = Some(decision.signal);

            let message = format!(
                "{} ALERT – {}\n\nReason: {}\n\nAdvisory only. Final decision is yours.",
                decision.signal, commitment.commodity, decision.reason
            );
            match notifier.notify(&commitment.user_id, &message) {
                Ok(()) => outcome.notified += 1,
                Err(e) => outcome
                    .errors
                    .push((commitment.commit_id.clone(), e.to_string())),
            }
        }

        if decision.signal == ExitSignal::Sell {
            match history.latest_price(&commitment.commodity) {
                Ok(exit_price) => {
                    let settlement = settle(commitment, exit_price, fee_rate);
                    commitment.exit_price = Some(settlement.exit_price);
                    commitment.gross_profit = Some(settlement.gross_profit);
                    commitment.platform_fee = Some(settlement.platform_fee);
                    commitment.status = settlement.status;
                    outcome.settled += 1;
                }
                Err(e) => outcome
                    .errors
                    .push((commitment.commit_id.clone(), e.to_string())),
            }
        }
    }

    ledger.save(&commitments)?;
    Ok(outcome)
}
