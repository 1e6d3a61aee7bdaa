//! ExitDecision — the HOLD/SELL advisory.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary advisory for a committed quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExitSignal {
    Hold,
    Sell,
}

impl ExitSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitSignal::Hold => "HOLD",
            ExitSignal::Sell => "SELL",
        }
    }
}

impl fmt::Display for ExitSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExitSignal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HOLD" => Ok(ExitSignal::Hold),
            "SELL" => Ok(ExitSignal::Sell),
            other => Err(format!("unknown exit signal '{other}'")),
        }
    }
}

/// Output of the exit-signal decision table: the signal plus the reason text
/// shown to the user. Stateless; no identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitDecision {
    pub signal: ExitSignal,
    pub reason: String,
}

impl ExitDecision {
    pub fn sell(reason: &str) -> Self {
        Self {
            signal: ExitSignal::Sell,
            reason: reason.to_string(),
        }
    }

    pub fn hold(reason: &str) -> Self {
        Self {
            signal: ExitSignal::Hold,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_round_trips_through_str() {
        assert_eq!("HOLD".parse::<ExitSignal>().unwrap(), ExitSignal::Hold);
        assert_eq!("SELL".parse::<ExitSignal>().unwrap(), ExitSignal::Sell);
        assert_eq!(ExitSignal::Sell.to_string(), "SELL");
        assert!("hold".parse::<ExitSignal>().is_err());
    }
}
