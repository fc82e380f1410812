//! Backtest result — the wire contract handed to reporting layers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use quantbot_core::domain::{Market, Trade};
use quantbot_core::strategy::{StrategyKind, StrategyParams};

use crate::config::RunId;
use crate::metrics::PerformanceMetrics;

/// Single point in the equity curve.
///
/// Timestamps serialize as unix seconds, matching candle serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPoint {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub equity: f64,
}

/// Immutable snapshot of a finished backtest run.
///
/// Serializes to camelCase JSON — the shape any reporting layer consumes.
/// Dates render as `YYYY-MM-DD`; metrics are flattened into the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
    pub run_id: RunId,
    pub symbol: String,
    pub market: Market,
    pub strategy: StrategyKind,
    pub parameters: StrategyParams,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
    pub final_capital: f64,
    #[serde(flatten)]
    pub metrics: PerformanceMetrics,
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
}
