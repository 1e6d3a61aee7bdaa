//! MandiCast Runner — the boundary around the pure forecasting core.
//!
//! Everything that touches a file or talks to the outside world lives here:
//! - TOML configuration
//! - CSV history source (the agriculture dataset)
//! - Predictor store (per-commodity model files, loaded by name)
//! - Append-only CSV audit log
//! - Commitment ledger and settlement
//! - Notification delivery
//! - The observer sweep that ties it all together
//! - Synthetic history generation for demos and tests

pub mod audit_log;
pub mod config;
pub mod history;
pub mod ledger;
pub mod notify;
pub mod observer;
pub mod predictor_store;
pub mod synthetic;

pub use audit_log::CsvAuditLog;
pub use config::RunnerConfig;
pub use history::{CsvHistory, HistoryError};
pub use ledger::{settle, Commitment, CommitmentStatus, Ledger, LedgerError, Settlement};
pub use notify::{ConsoleNotifier, Notifier, NotifyError};
pub use observer::{observe_commitments, SweepOutcome};
pub use predictor_store::{LinearPredictor, PredictorError, PredictorStore};
pub use synthetic::synthetic_history;
