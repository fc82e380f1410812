//! Serializable backtest configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use quantbot_core::domain::Market;
use quantbot_core::strategy::StrategyParams;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Everything needed to reproduce one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub market: Market,
    pub symbol: String,
    pub params: StrategyParams,

    /// First day of the simulated range (inclusive, midnight UTC).
    pub start_date: NaiveDate,

    /// Last day of the simulated range (inclusive, midnight UTC).
    pub end_date: NaiveDate,

    pub initial_capital: f64,
}

impl BacktestConfig {
    /// Deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share a RunId, which is what makes
    /// result deduplication and reproducibility checks possible.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("BacktestConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
