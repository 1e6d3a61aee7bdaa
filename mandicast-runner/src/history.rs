//! CSV history source — the agriculture dataset on disk.
//!
//! One file holds every commodity, keyed by (Date, Commodity), with the
//! dataset's original column headers. `load_history` filters to one
//! commodity and sorts ascending by date; the feature builder sorts again
//! on its own, but callers such as `latest_price` rely on the order here.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mandicast_core::domain::PricePoint;

/// Errors from the history file layer.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to open history file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed history row: {0}")]
    Malformed(#[from] csv::Error),

    #[error("no history for commodity '{commodity}'")]
    UnknownCommodity { commodity: String },
}

/// One row of the dataset file, in its on-disk column names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Commodity")]
    pub commodity: String,
    #[serde(rename = "Daily_Mandi_Price")]
    pub daily_price: f64,
    #[serde(rename = "Daily_Arrivals_Tonnes")]
    pub daily_arrivals: f64,
    #[serde(rename = "Rainfall_Deviation_Pct")]
    pub rainfall_deviation_pct: f64,
    #[serde(rename = "MSP")]
    pub msp: f64,
    #[serde(rename = "FCI_Stock_LMT")]
    pub fci_stock_lmt: f64,
    #[serde(rename = "Fertilizer_Price_Index")]
    pub fertilizer_price_index: f64,
    #[serde(rename = "Procurement_Season_Flag")]
    pub procurement_season_flag: u8,
    #[serde(rename = "Export_Ban_Flag")]
    pub export_ban_flag: u8,
    #[serde(rename = "Festival_Season_Flag")]
    pub festival_season_flag: u8,
}

impl From<HistoryRecord> for PricePoint {
    fn from(r: HistoryRecord) -> Self {
        PricePoint {
            date: r.date,
            commodity: r.commodity,
            daily_price: r.daily_price,
            daily_arrivals: r.daily_arrivals,
            rainfall_deviation_pct: r.rainfall_deviation_pct,
            msp: r.msp,
            fci_stock_lmt: r.fci_stock_lmt,
            fertilizer_price_index: r.fertilizer_price_index,
            procurement_season_flag: r.procurement_season_flag != 0,
            export_ban_flag: r.export_ban_flag != 0,
            festival_season_flag: r.festival_season_flag != 0,
        }
    }
}

impl From<&PricePoint> for HistoryRecord {
    fn from(p: &PricePoint) -> Self {
        HistoryRecord {
            date: p.date,
            commodity: p.commodity.clone(),
            daily_price: p.daily_price,
            daily_arrivals: p.daily_arrivals,
            rainfall_deviation_pct: p.rainfall_deviation_pct,
            msp: p.msp,
            fci_stock_lmt: p.fci_stock_lmt,
            fertilizer_price_index: p.fertilizer_price_index,
            procurement_season_flag: p.procurement_season_flag as u8,
            export_ban_flag: p.export_ban_flag as u8,
            festival_season_flag: p.festival_season_flag as u8,
        }
    }
}

/// History source over a single CSV file.
#[derive(Debug, Clone)]
pub struct CsvHistory {
    path: PathBuf,
}

impl CsvHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load one commodity's full series, sorted ascending by date.
    pub fn load_history(&self, commodity: &str) -> Result<Vec<PricePoint>, HistoryError> {
        let mut reader = self.open()?;
        let mut points = Vec::new();
        for record in reader.deserialize::<HistoryRecord>() {
            let record = record?;
            if record.commodity == commodity {
                points.push(PricePoint::from(record));
            }
        }
        if points.is_empty() {
            return Err(HistoryError::UnknownCommodity {
                commodity: commodity.to_string(),
            });
        }
        points.sort_by_key(|p| p.date);
        Ok(points)
    }

    /// Latest recorded price for a commodity (settlement exit price).
    pub fn latest_price(&self, commodity: &str) -> Result<f64, HistoryError> {
        let points = self.load_history(commodity)?;
        Ok(points.last().expect("load_history never returns empty").daily_price)
    }

    /// Distinct commodities present in the file.
    pub fn commodities(&self) -> Result<Vec<String>, HistoryError> {
        let mut reader = self.open()?;
        let mut names: Vec<String> = Vec::new();
        for record in reader.deserialize::<HistoryRecord>() {
            let record = record?;
            if !names.contains(&record.commodity) {
                names.push(record.commodity);
            }
        }
        Ok(names)
    }

    /// Append rows to the file, writing the header when the file is new.
    /// Used by the synthetic seeder.
    pub fn append_points(&self, points: &[PricePoint]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| HistoryError::Open {
                path: self.path.clone(),
                source,
            })?;
        }
        let new_file = !self.path.exists()
            || std::fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| HistoryError::Open {
                path: self.path.clone(),
                source,
            })?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(new_file)
            .from_writer(file);
        for point in points {
            writer.serialize(HistoryRecord::from(point))?;
        }
        writer.flush().map_err(|source| HistoryError::Open {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<csv::Reader<std::fs::File>, HistoryError> {
        csv::Reader::from_path(&self.path).map_err(|e| match e.kind() {
            csv::ErrorKind::Io(_) => HistoryError::Open {
                path: self.path.clone(),
                source: std::io::Error::other(e.to_string()),
            },
            _ => HistoryError::Malformed(e),
        })
    }
}
