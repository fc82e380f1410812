//! Backtest simulation engine.
//!
//! Replays a candle series bar-by-bar: each bar past the warmup gets a
//! fresh trend signal over the history so far, and the single working
//! position is opened, marked to market, and closed against fixed exit
//! rules. The run owns its balance, position, ledger, and curve outright;
//! results leave as an immutable snapshot.
//!
//! Given identical candles and configuration the output is byte-identical:
//! no randomness, no wall clock — the only time reference is the
//! caller-supplied date range.

use chrono::{DateTime, NaiveDate, Utc};

use quantbot_core::domain::{Candle, Position};
use quantbot_core::strategy::detect_trend;

use crate::config::BacktestConfig;
use crate::metrics::PerformanceMetrics;
use crate::result::{BacktestResult, EquityPoint};

/// Fraction of balance risked per trade when sizing an entry.
const RISK_PER_TRADE: f64 = 0.02;
/// Stop-loss distance assumed by the sizing formula.
const SIZING_STOP_LOSS: f64 = 0.03;
/// Hard cap on a single position as a fraction of balance.
const MAX_POSITION_FRACTION: f64 = 0.2;

/// Fixed take-profit exit for simulated positions. A baseline, deliberately
/// independent of the user-tunable live thresholds in `quantbot_core::risk`.
const TAKE_PROFIT_PCT: f64 = 0.05;
/// Fixed stop-loss exit for simulated positions.
const STOP_LOSS_PCT: f64 = 0.03;

/// Run one backtest over `candles` (any order, any range — the engine
/// filters to the configured window and sorts ascending).
pub fn run_backtest(candles: &[Candle], config: &BacktestConfig) -> BacktestResult {
    let start = day_start(config.start_date);
    let end = day_start(config.end_date);

    let mut series: Vec<Candle> = candles
        .iter()
        .filter(|c| c.timestamp >= start && c.timestamp <= end)
        .cloned()
        .collect();
    series.sort_by_key(|c| c.timestamp);

    let params = &config.params;
    let warmup = params.warmup_period();

    let mut balance = config.initial_capital;
    let mut position: Option<Position> = None;
    let mut trades = Vec::new();
    let mut equity_curve = vec![EquityPoint {
        timestamp: start,
        equity: config.initial_capital,
    }];

    for i in warmup..series.len() {
        let candle = &series[i];
        let signal = detect_trend(&series[..=i], params);

        if let Some(open) = position.take() {
            let profit_percent = open.pnl_percent(candle.close);
            let profit_amount = open.pnl_amount(candle.close);
            let equity = balance + profit_amount;
            equity_curve.push(EquityPoint {
                timestamp: candle.timestamp,
                equity,
            });

            let should_close = signal.opposes(open.side)
                || profit_percent >= TAKE_PROFIT_PCT
                || profit_percent <= -STOP_LOSS_PCT;

            if should_close {
                balance = equity;
                trades.push(open.close(candle.close, candle.timestamp));
            } else {
                position = Some(open);
            }
        } else {
            if let Some(side) = signal.entry_side() {
                let size = entry_size(balance);
                position = Some(Position {
                    symbol: config.symbol.clone(),
                    side,
                    entry: candle.close,
                    size,
                    value: size,
                    opened_at: candle.timestamp,
                });
            }
            equity_curve.push(EquityPoint {
                timestamp: candle.timestamp,
                equity: balance,
            });
        }
    }

    // Series exhausted: any position still open closes at the last price.
    if let Some(open) = position.take() {
        let last = series.last().expect("open position implies candles");
        let closed = open.close(last.close, last.timestamp);
        balance += closed.profit;
        trades.push(closed);
    }

    let metrics = PerformanceMetrics::compute(&trades, &equity_curve, config.initial_capital);

    BacktestResult {
        run_id: config.run_id(),
        symbol: config.symbol.clone(),
        market: config.market,
        strategy: params.strategy,
        parameters: params.clone(),
        start_date: config.start_date,
        end_date: config.end_date,
        initial_capital: config.initial_capital,
        final_capital: balance,
        metrics,
        equity_curve,
        trades,
    }
}

/// Position notional for a new entry: 2% of balance at risk against a 3%
/// stop, capped at 20% of balance.
fn entry_size(balance: f64) -> f64 {
    (balance * RISK_PER_TRADE / SIZING_STOP_LOSS).min(balance * MAX_POSITION_FRACTION)
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
}
