//! Trade-ledger analytics — summary statistics over closed trades.
//!
//! Complements `metrics`: these run off the ledger alone, with no equity
//! curve, which is what a live bot has on hand. The Sharpe flavor here is
//! the trade-based one — sample standard deviation, not annualized —
//! distinct from the equity-curve Sharpe in `metrics`.

use serde::{Deserialize, Serialize};

use quantbot_core::domain::Trade;

use crate::metrics::round2;

/// Aggregate view of a closed-trade ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeLedgerSummary {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub total_profit: f64,
    pub win_rate: f64,
    pub avg_profit: f64,
    pub best_trade: Option<f64>,
    pub worst_trade: Option<f64>,
    pub max_win_streak: usize,
    pub avg_hold_secs: f64,
    pub sharpe_ratio: f64,
}

impl TradeLedgerSummary {
    /// Summarize a ledger. Zero trades yields the all-zero summary.
    pub fn from_trades(trades: &[Trade]) -> Self {
        if trades.is_empty() {
            return Self::default();
        }

        let total = trades.len();
        let mut wins = 0;
        let mut losses = 0;
        let mut best: Option<f64> = None;
        let mut worst: Option<f64> = None;
        let mut streak = 0;
        let mut max_streak = 0;
        let mut total_profit = 0.0;

        for trade in trades {
            let p = trade.profit;
            total_profit += p;
            if p > 0.0 {
                wins += 1;
                streak += 1;
            } else if p < 0.0 {
                losses += 1;
                streak = 0;
            }
            // A flat trade neither extends nor breaks a winning streak.
            max_streak = max_streak.max(streak);
            best = Some(best.map_or(p, |b: f64| b.max(p)));
            worst = Some(worst.map_or(p, |w: f64| w.min(p)));
        }

        let avg_hold_secs =
            trades.iter().map(|t| t.hold_secs() as f64).sum::<f64>() / total as f64;

        Self {
            total,
            wins,
            losses,
            total_profit,
            win_rate: round2(wins as f64 / total as f64 * 100.0),
            avg_profit: round2(total_profit / total as f64),
            best_trade: best,
            worst_trade: worst,
            max_win_streak: max_streak,
            avg_hold_secs,
            sharpe_ratio: trade_sharpe(trades, 0.0),
        }
    }
}

/// Trade-based Sharpe ratio: mean profit over sample standard deviation
/// (n-1 divisor), minus the risk-free rate. Not annualized. Zero with fewer
/// than 2 trades or no dispersion.
pub fn trade_sharpe(trades: &[Trade], risk_free_rate: f64) -> f64 {
    let n = trades.len();
    if n < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = trades.iter().map(|t| t.profit).collect();
    let avg = returns.iter().sum::<f64>() / n as f64;
    let variance =
        returns.iter().map(|r| (r - avg).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = variance.sqrt();
    if std == 0.0 {
        return 0.0;
    }
    (avg - risk_free_rate) / std
}
