//! Commitment ledger — CSV-backed record of quantities committed for sale.
//!
//! A commitment tracks one user's declared intent to sell a quantity of a
//! commodity, from entry until settlement. The exit-signal engine drives
//! the status transitions (active → unpaid | settled); the ledger itself is
//! plain storage with a single read and a single write per sweep.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mandicast_core::domain::{round2, ExitSignal};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to access ledger {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed ledger row: {0}")]
    Malformed(#[from] csv::Error),
}

/// Lifecycle of a commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentStatus {
    /// Still held; swept by the observer.
    Active,
    /// Sold with positive profit; platform fee outstanding.
    Unpaid,
    /// Closed out with no fee due.
    Settled,
}

/// One ledger row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub commit_id: String,
    /// Phone number in `+<country><number>` form.
    pub user_id: String,
    pub commodity: String,
    pub entry_price: f64,
    pub quantity: f64,
    pub entry_date: DateTime<Utc>,
    pub current_signal: ExitSignal,
    pub last_notified_signal: Option<ExitSignal>,
    pub exit_price: Option<f64>,
    pub gross_profit: Option<f64>,
    pub platform_fee: Option<f64>,
    pub status: CommitmentStatus,
}

impl Commitment {
    /// Open a new commitment at the given entry price.
    ///
    /// The ID is the first 8 hex characters of a content hash over the
    /// user, commodity, and entry timestamp.
    pub fn open(user_id: &str, commodity: &str, quantity: f64, entry_price: f64) -> Self {
        let entry_date = Utc::now();
        let digest = blake3::hash(
            format!("{user_id}|{commodity}|{}", entry_date.to_rfc3339()).as_bytes(),
        );
        let commit_id = digest.to_hex()[..8].to_string();

        Self {
            commit_id,
            user_id: user_id.to_string(),
            commodity: commodity.to_string(),
            entry_price,
            quantity,
            entry_date,
            current_signal: ExitSignal::Hold,
            last_notified_signal: None,
            exit_price: None,
            gross_profit: None,
            platform_fee: None,
            status: CommitmentStatus::Active,
        }
    }
}

/// Settlement arithmetic output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub exit_price: f64,
    pub gross_profit: f64,
    pub platform_fee: f64,
    pub status: CommitmentStatus,
}

/// Compute the settlement for a commitment sold at `exit_price`.
///
/// The platform fee applies only to positive gross profit; a losing exit
/// settles immediately with no fee.
pub fn settle(commitment: &Commitment, exit_price: f64, fee_rate: f64) -> Settlement {
    let gross_profit = (exit_price - commitment.entry_price) * commitment.quantity;
    let platform_fee = if gross_profit > 0.0 {
        gross_profit * fee_rate
    } else {
        0.0
    };
    Settlement {
        exit_price: round2(exit_price),
        gross_profit: round2(gross_profit),
        platform_fee: round2(platform_fee),
        status: if gross_profit > 0.0 {
            CommitmentStatus::Unpaid
        } else {
            CommitmentStatus::Settled
        },
    }
}

/// CSV-backed commitment storage.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All commitments. An absent file is an empty ledger.
    pub fn load(&self) -> Result<Vec<Commitment>, LedgerError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut commitments = Vec::new();
        for record in reader.deserialize::<Commitment>() {
            commitments.push(record?);
        }
        Ok(commitments)
    }

    /// Rewrite the full ledger. One write per sweep.
    pub fn save(&self, commitments: &[Commitment]) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LedgerError::Io {
                path: self.path.clone(),
                source,
            })?;
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        for commitment in commitments {
            writer.serialize(commitment)?;
        }
        writer.flush().map_err(|source| LedgerError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Append one commitment, preserving the rest.
    pub fn append(&self, commitment: Commitment) -> Result<(), LedgerError> {
        let mut commitments = self.load()?;
        commitments.push(commitment);
        self.save(&commitments)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
