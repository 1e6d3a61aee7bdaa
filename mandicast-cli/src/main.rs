//! MandiCast CLI — forecast, advise, commit, observe, seed.
//!
//! Commands:
//! - `forecast` — 7-day price forecast for a commodity, as JSON
//! - `signal` — forecast plus the HOLD/SELL advisory
//! - `commit` — record a committed quantity at the latest price
//! - `observe` — sweep all active commitments: notify and settle
//! - `seed` — generate synthetic history and a baseline model for demos

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

use mandicast_core::domain::{ForecastResult, PricePoint};
use mandicast_core::{decide_exit_signal, forecast};
use mandicast_runner::{
    observe_commitments, synthetic::synthetic_history, Commitment, ConsoleNotifier,
    CsvAuditLog, CsvHistory, HistoryError, Ledger, LinearPredictor, PredictorStore,
    RunnerConfig,
};

#[derive(Parser)]
#[command(
    name = "mandicast",
    about = "MandiCast CLI — commodity price forecasts and sell advisories"
)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a 7-day forecast for a commodity as JSON.
    Forecast {
        /// Commodity name as it appears in the dataset (e.g., Wheat).
        commodity: String,
    },
    /// Print the forecast and the HOLD/SELL advisory for a commodity.
    Signal {
        commodity: String,
    },
    /// Commit a quantity for sale at the latest recorded price.
    Commit {
        /// Recipient phone in +<country><number> form.
        #[arg(long)]
        user: String,

        #[arg(long)]
        commodity: String,

        /// Quantity in tonnes.
        #[arg(long)]
        quantity: f64,
    },
    /// Sweep all active commitments: notify signal changes, settle SELLs.
    Observe,
    /// Generate synthetic history and a baseline model for a commodity.
    Seed {
        commodity: String,

        /// Days of history to generate.
        #[arg(long, default_value_t = 365)]
        days: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => RunnerConfig::from_file(path)?,
        None => RunnerConfig::default(),
    };

    match cli.command {
        Commands::Forecast { commodity } => {
            let result = run_forecast(&config, &commodity)?;
            println!("{}", serde_json::to_string_pretty(&api_json(&result))?);
        }
        Commands::Signal { commodity } => {
            let result = run_forecast(&config, &commodity)?;
            let decision = decide_exit_signal(&result);
            let out = json!({
                "commodity": result.commodity,
                "signal": decision.signal.as_str(),
                "reason": decision.reason,
                "forecast": api_json(&result),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Commit {
            user,
            commodity,
            quantity,
        } => {
            let history = CsvHistory::new(&config.data_file);
            let series = load_series(&history, &commodity)?;
            let entry_price = series
                .last()
                .map(|p| p.daily_price)
                .context("history is empty")?;
            let commitment = Commitment::open(&user, &commodity, quantity, entry_price);
            let ledger = Ledger::new(config.ledger_path());
            ledger.append(commitment.clone())?;
            println!(
                "committed {} t of {} at {} (id {})",
                quantity, commodity, entry_price, commitment.commit_id
            );
        }
        Commands::Observe => {
            let history = CsvHistory::new(&config.data_file);
            let store = PredictorStore::new(&config.models_dir);
            let ledger = Ledger::new(config.ledger_path());
            let audit = CsvAuditLog::new(config.audit_log_path());

            let outcome = observe_commitments(
                &ledger,
                &history,
                &store,
                &audit,
                &ConsoleNotifier,
                config.horizon_days,
                config.platform_fee_rate,
            )?;

            println!(
                "checked {}, notified {}, settled {}",
                outcome.checked, outcome.notified, outcome.settled
            );
            for (subject, error) in &outcome.errors {
                eprintln!("warning: {subject}: {error}");
            }
        }
        Commands::Seed {
            commodity,
            days,
            seed,
        } => {
            let history = CsvHistory::new(&config.data_file);
            let points = synthetic_history(&commodity, days, seed);
            history.append_points(&points)?;

            let store = PredictorStore::new(&config.models_dir);
            store.save(&commodity, &LinearPredictor::persistence_baseline())?;

            println!(
                "seeded {days} days of {commodity} into {} and a baseline model into {}",
                config.data_file.display(),
                config.models_dir.display()
            );
        }
    }
    Ok(())
}

fn run_forecast(config: &RunnerConfig, commodity: &str) -> Result<ForecastResult> {
    let history = CsvHistory::new(&config.data_file);
    let store = PredictorStore::new(&config.models_dir);
    let audit = CsvAuditLog::new(config.audit_log_path());

    let series = load_series(&history, commodity)?;
    let model = store
        .load(commodity)
        .with_context(|| format!("no usable model for '{commodity}'"))?;
    forecast(&series, &model, config.horizon_days, &audit)
        .with_context(|| format!("forecast failed for '{commodity}'"))
}

/// Load a commodity's series, listing what the data file does hold when the
/// requested name is unknown.
fn load_series(history: &CsvHistory, commodity: &str) -> Result<Vec<PricePoint>> {
    history.load_history(commodity).map_err(|e| match e {
        HistoryError::UnknownCommodity { .. } => match history.commodities() {
            Ok(names) if !names.is_empty() => {
                anyhow!("{e} (available: {})", names.join(", "))
            }
            _ => anyhow!(e),
        },
        other => anyhow!(other),
    })
}

/// Shape the result the way downstream consumers expect: the forecast as a
/// `day_1..day_N` object rather than an array.
fn api_json(result: &ForecastResult) -> serde_json::Value {
    let mut days = serde_json::Map::new();
    for (i, price) in result.forecast_days.iter().enumerate() {
        days.insert(format!("day_{}", i + 1), json!(price));
    }
    json!({
        "commodity": &result.commodity,
        "generated_on": result.generated_on.to_rfc3339(),
        "forecast_7_days": days,
        "confidence_band": &result.confidence_band,
        "historical_comparison": &result.historical_comparison,
        "seasonal_outlook": &result.seasonal_outlook,
    })
}
