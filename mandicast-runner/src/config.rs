//! Runner configuration, loaded from TOML.
//!
//! Every field has a default so the CLI works out of the box against the
//! conventional `data/` / `models/` / `logs/` layout; a config file only
//! needs to name what it overrides.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use mandicast_core::{DEFAULT_HORIZON, MIN_HORIZON_DAYS};

/// Platform fee charged on positive gross profit at settlement.
pub const DEFAULT_FEE_RATE: f64 = 0.10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    /// CSV file holding the full multi-commodity history.
    pub data_file: PathBuf,
    /// Directory of per-commodity model files (`<Commodity>.json`).
    pub models_dir: PathBuf,
    /// Directory for the audit log and the commitment ledger.
    pub logs_dir: PathBuf,
    /// Fraction of positive gross profit kept at settlement.
    pub platform_fee_rate: f64,
    /// Forecast horizon in days.
    pub horizon_days: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/mandi_history.csv"),
            models_dir: PathBuf::from("models"),
            logs_dir: PathBuf::from("logs"),
            platform_fee_rate: DEFAULT_FEE_RATE,
            horizon_days: DEFAULT_HORIZON,
        }
    }
}

impl RunnerConfig {
    /// Load from a TOML file, filling unspecified fields with defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: RunnerConfig = toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// The exit-signal table indexes two days back from the last forecast
    /// day, so the horizon must be at least [`MIN_HORIZON_DAYS`].
    pub fn validate(&self) -> Result<()> {
        if self.horizon_days < MIN_HORIZON_DAYS {
            bail!(
                "horizon_days must be at least {MIN_HORIZON_DAYS}, got {}",
                self.horizon_days
            );
        }
        if !(0.0..1.0).contains(&self.platform_fee_rate) {
            bail!(
                "platform_fee_rate must be in [0, 1), got {}",
                self.platform_fee_rate
            );
        }
        Ok(())
    }

    /// Path of the append-only prediction audit log.
    pub fn audit_log_path(&self) -> PathBuf {
        self.logs_dir.join("prediction_history.csv")
    }

    /// Path of the commitment ledger.
    pub fn ledger_path(&self) -> PathBuf {
        self.logs_dir.join("commitments.csv")
    }
}
