//! End-to-end observer sweep tests over a temp-dir data layout.

use std::sync::Mutex;

use chrono::NaiveDate;
use tempfile::TempDir;

use mandicast_core::domain::ExitSignal;
use mandicast_core::NoopAudit;
use mandicast_runner::synthetic::synthetic_history_from;
use mandicast_runner::{
    observe_commitments, Commitment, CommitmentStatus, CsvAuditLog, CsvHistory, Ledger,
    LinearPredictor, Notifier, NotifyError, PredictorStore,
};

/// Notifier that records every delivery.
#[derive(Default)]
struct CaptureNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl Notifier for CaptureNotifier {
    fn notify(&self, recipient: &str, message: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), message.to_string()));
        Ok(())
    }
}

/// Notifier whose gateway is down.
struct DeadGatewayNotifier;

impl Notifier for DeadGatewayNotifier {
    fn notify(&self, _recipient: &str, _message: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery("gateway timeout".into()))
    }
}

struct Fixture {
    _dir: TempDir,
    history: CsvHistory,
    store: PredictorStore,
    ledger: Ledger,
}

/// 182 synthetic days ending 2024-06-30: June is seasonally neutral, and the
/// persistence baseline produces a flat forecast, so the upside rule decides
/// SELL for every commodity here.
fn fixture(commodities: &[&str]) -> Fixture {
    let dir = TempDir::new().unwrap();
    let history = CsvHistory::new(dir.path().join("data").join("mandi_history.csv"));
    let store = PredictorStore::new(dir.path().join("models"));
    let ledger = Ledger::new(dir.path().join("logs").join("commitments.csv"));

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for (i, commodity) in commodities.iter().enumerate() {
        let series = synthetic_history_from(commodity, start, 182, 40 + i as u64);
        history.append_points(&series).unwrap();
        store
            .save(commodity, &LinearPredictor::persistence_baseline())
            .unwrap();
    }

    Fixture {
        _dir: dir,
        history,
        store,
        ledger,
    }
}

#[test]
fn sell_transition_notifies_and_settles() {
    let f = fixture(&["Wheat"]);
    let latest = f.history.latest_price("Wheat").unwrap();

    // Entry well below the latest price: settlement must be profitable.
    let mut c = Commitment::open("+911234567890", "Wheat", 10.0, latest - 100.0);
    c.commit_id = "aaaa0001".into();
    f.ledger.append(c).unwrap();

    let notifier = CaptureNotifier::default();
    let outcome = observe_commitments(
        &f.ledger, &f.history, &f.store, &NoopAudit, &notifier, 7, 0.10,
    )
    .unwrap();

    assert_eq!(outcome.checked, 1);
    assert_eq!(outcome.notified, 1);
    assert_eq!(outcome.settled, 1);
    assert!(outcome.errors.is_empty());

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "+911234567890");
    assert!(sent[0].1.starts_with("SELL ALERT – Wheat"));
    assert!(sent[0].1.contains("Advisory only"));

    let saved = f.ledger.load().unwrap();
    assert_eq!(saved[0].current_signal, ExitSignal::Sell);
    assert_eq!(saved[0].last_notified_signal, Some(ExitSignal::Sell));
    assert_eq!(saved[0].status, CommitmentStatus::Unpaid);
    assert_eq!(saved[0].exit_price, Some(latest));
    let gross = saved[0].gross_profit.unwrap();
    assert!((gross - 1000.0).abs() < 1.0);
    assert!((saved[0].platform_fee.unwrap() - gross * 0.10).abs() < 0.01);
}

#[test]
fn losing_exit_settles_without_fee() {
    let f = fixture(&["Rice"]);
    let latest = f.history.latest_price("Rice").unwrap();

    let c = Commitment::open("+911234567890", "Rice", 5.0, latest + 200.0);
    f.ledger.append(c).unwrap();

    let notifier = CaptureNotifier::default();
    observe_commitments(
        &f.ledger, &f.history, &f.store, &NoopAudit, &notifier, 7, 0.10,
    )
    .unwrap();

    let saved = f.ledger.load().unwrap();
    assert_eq!(saved[0].status, CommitmentStatus::Settled);
    assert_eq!(saved[0].platform_fee, Some(0.0));
    assert!(saved[0].gross_profit.unwrap() < 0.0);
}

#[test]
fn unchanged_signal_is_not_renotified() {
    let f = fixture(&["Wheat"]);
    let latest = f.history.latest_price("Wheat").unwrap();

    // Already on SELL: the sweep settles but sends nothing.
    let mut c = Commitment::open("+911234567890", "Wheat", 10.0, latest - 50.0);
    c.current_signal = ExitSignal::Sell;
    f.ledger.append(c).unwrap();

    let notifier = CaptureNotifier::default();
    let outcome = observe_commitments(
        &f.ledger, &f.history, &f.store, &NoopAudit, &notifier, 7, 0.10,
    )
    .unwrap();

    assert_eq!(outcome.notified, 0);
    assert_eq!(outcome.settled, 1);
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[test]
fn settled_commitments_are_skipped_on_the_next_sweep() {
    let f = fixture(&["Wheat"]);
    let latest = f.history.latest_price("Wheat").unwrap();
    f.ledger
        .append(Commitment::open("+911234567890", "Wheat", 10.0, latest - 50.0))
        .unwrap();

    let notifier = CaptureNotifier::default();
    observe_commitments(
        &f.ledger, &f.history, &f.store, &NoopAudit, &notifier, 7, 0.10,
    )
    .unwrap();
    let second = observe_commitments(
        &f.ledger, &f.history, &f.store, &NoopAudit, &notifier, 7, 0.10,
    )
    .unwrap();

    assert_eq!(second.checked, 0);
    assert_eq!(second.settled, 0);
    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
}

#[test]
fn failed_delivery_is_collected_not_fatal() {
    let f = fixture(&["Wheat"]);
    let latest = f.history.latest_price("Wheat").unwrap();

    let c = Commitment::open("+911234567890", "Wheat", 10.0, latest - 50.0);
    let commit_id = c.commit_id.clone();
    f.ledger.append(c).unwrap();

    let outcome = observe_commitments(
        &f.ledger,
        &f.history,
        &f.store,
        &NoopAudit,
        &DeadGatewayNotifier,
        7,
        0.10,
    )
    .unwrap();

    // The send failed but the sweep carried on: the transition is recorded
    // against the commitment and settlement still happens.
    assert_eq!(outcome.notified, 0);
    assert_eq!(outcome.settled, 1);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].0, commit_id);
    assert!(outcome.errors[0].1.contains("delivery failed"));

    let saved = f.ledger.load().unwrap();
    assert_eq!(saved[0].current_signal, ExitSignal::Sell);
    assert_eq!(saved[0].status, CommitmentStatus::Unpaid);
}

#[test]
fn missing_model_is_collected_not_fatal() {
    let f = fixture(&["Wheat"]);
    let latest = f.history.latest_price("Wheat").unwrap();

    // A commitment on a commodity with history but no model file.
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    f.history
        .append_points(&synthetic_history_from("Maize", start, 182, 99))
        .unwrap();
    f.ledger
        .append(Commitment::open("+911111111111", "Maize", 2.0, 2000.0))
        .unwrap();
    f.ledger
        .append(Commitment::open("+912222222222", "Wheat", 10.0, latest - 50.0))
        .unwrap();

    let notifier = CaptureNotifier::default();
    let outcome = observe_commitments(
        &f.ledger, &f.history, &f.store, &NoopAudit, &notifier, 7, 0.10,
    )
    .unwrap();

    // Wheat proceeded; Maize reported one error and its row is untouched.
    assert_eq!(outcome.settled, 1);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].0, "Maize");

    let saved = f.ledger.load().unwrap();
    let maize = saved.iter().find(|c| c.commodity == "Maize").unwrap();
    assert_eq!(maize.status, CommitmentStatus::Active);
    assert_eq!(maize.current_signal, ExitSignal::Hold);
}

#[test]
fn sweep_writes_the_audit_log() {
    let f = fixture(&["Wheat"]);
    let latest = f.history.latest_price("Wheat").unwrap();
    f.ledger
        .append(Commitment::open("+911234567890", "Wheat", 10.0, latest - 50.0))
        .unwrap();

    let audit_path = f.ledger.path().parent().unwrap().join("prediction_history.csv");
    let audit = CsvAuditLog::new(&audit_path);
    let notifier = CaptureNotifier::default();
    observe_commitments(&f.ledger, &f.history, &f.store, &audit, &notifier, 7, 0.10).unwrap();

    let text = std::fs::read_to_string(&audit_path).unwrap();
    assert!(text.lines().count() >= 2);
    assert!(text.contains("Wheat"));
}
