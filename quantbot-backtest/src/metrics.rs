//! Performance metrics — pure functions over a trade ledger and equity curve.
//!
//! Every metric is a pure function: ledger and/or curve in, scalar out.
//! Percentages (win rate, ROI, drawdown) are expressed on a 0–100 scale and
//! rounded to two decimals in the aggregate, the precision the wire contract
//! promises. The profit-factor and RSI-style division guards resolve to
//! fixed sentinels, never errors.

use serde::{Deserialize, Serialize};

use quantbot_core::domain::Trade;

use crate::result::EquityPoint;

/// Sentinel profit factor when there are gross profits but zero gross loss.
pub const PROFIT_FACTOR_CAP: f64 = 999.0;

/// Trading periods per year used to annualize the Sharpe ratio.
const PERIODS_PER_YEAR: f64 = 252.0;

/// Aggregate performance metrics for one backtest run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub net_profit: f64,
    pub return_on_investment: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
}

impl PerformanceMetrics {
    /// Compute all metrics from a finished ledger and equity curve.
    pub fn compute(trades: &[Trade], equity_curve: &[EquityPoint], initial_capital: f64) -> Self {
        let total_trades = trades.len();
        let winning_trades = trades.iter().filter(|t| t.is_winner()).count();
        let losing_trades = total_trades - winning_trades;

        let gross_profit = gross_profit(trades);
        let gross_loss = gross_loss(trades);
        let net_profit = gross_profit - gross_loss;

        Self {
            net_profit,
            return_on_investment: round2(net_profit / initial_capital * 100.0),
            total_trades,
            winning_trades,
            losing_trades,
            win_rate: round2(win_rate(trades)),
            profit_factor: round2(profit_factor(trades)),
            largest_win: largest_win(trades),
            largest_loss: largest_loss(trades),
            max_drawdown: round2(max_drawdown(equity_curve, initial_capital)),
            sharpe_ratio: sharpe_ratio(equity_curve),
        }
    }
}

// ─── Ledger metrics ─────────────────────────────────────────────────

/// Sum of profits over winning trades.
pub fn gross_profit(trades: &[Trade]) -> f64 {
    trades
        .iter()
        .filter(|t| t.is_winner())
        .map(|t| t.profit)
        .sum()
}

/// Sum of |profit| over non-winning trades. A zero-profit trade counts as a
/// loss for the win rate but contributes nothing here.
pub fn gross_loss(trades: &[Trade]) -> f64 {
    trades
        .iter()
        .filter(|t| !t.is_winner())
        .map(|t| t.profit.abs())
        .sum()
}

/// Winning trades as a percentage of all trades. Zero when the ledger is empty.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let wins = trades.iter().filter(|t| t.is_winner()).count();
    wins as f64 / trades.len() as f64 * 100.0
}

/// Gross profit / gross loss, with fixed sentinels when the divisor is zero:
/// 999 if there were profits, 0 otherwise.
pub fn profit_factor(trades: &[Trade]) -> f64 {
    let profit = gross_profit(trades);
    let loss = gross_loss(trades);
    if loss > 0.0 {
        profit / loss
    } else if profit > 0.0 {
        PROFIT_FACTOR_CAP
    } else {
        0.0
    }
}

/// Largest single winning trade's profit; 0 with no winners.
pub fn largest_win(trades: &[Trade]) -> f64 {
    trades
        .iter()
        .filter(|t| t.is_winner())
        .map(|t| t.profit)
        .fold(0.0, f64::max)
}

/// Largest single losing trade's |profit|; 0 with no losers.
pub fn largest_loss(trades: &[Trade]) -> f64 {
    trades
        .iter()
        .filter(|t| !t.is_winner())
        .map(|t| t.profit.abs())
        .fold(0.0, f64::max)
}

// ─── Curve metrics ──────────────────────────────────────────────────

/// Maximum percentage decline from the running equity peak.
///
/// The peak seeds at `initial_capital` and resets whenever a new high is
/// made; the reported drawdown is the deepest (peak - equity) / peak seen,
/// on a 0–100 scale.
pub fn max_drawdown(equity_curve: &[EquityPoint], initial_capital: f64) -> f64 {
    let mut peak = initial_capital;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        } else {
            let dd = (peak - point.equity) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Annualized Sharpe ratio from per-step equity returns.
///
/// mean(returns) / stddev(returns) * sqrt(252), population stddev.
/// Zero when there are fewer than 2 return points or no variance.
pub fn sharpe_ratio(equity_curve: &[EquityPoint]) -> f64 {
    let returns: Vec<f64> = equity_curve
        .windows(2)
        .map(|w| (w[1].equity - w[0].equity) / w[0].equity)
        .collect();
    if returns.len() < 2 {
        return 0.0;
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance =
        returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    let std_dev = variance.sqrt();

    if std_dev > 0.0 {
        mean / std_dev * PERIODS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}

/// Round to two decimals — the precision the wire contract reports.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
