//! Property tests for engine invariants.
//!
//! Uses proptest to verify, over arbitrary candle series:
//! 1. Determinism — identical inputs give identical serialized results
//! 2. Ledger reconciliation — trade profits sum to the capital delta
//! 3. Position exclusivity — trades never overlap in time
//! 4. Curve shape — one equity point per processed bar, plus the seed point

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use quantbot_backtest::{run_backtest, BacktestConfig};
use quantbot_core::domain::{Candle, Market};
use quantbot_core::strategy::{StrategyKind, StrategyParams};

// ── Strategies (proptest) ────────────────────────────────────────────

/// Daily candle series built from bounded close prices and volumes.
fn arb_candles() -> impl Strategy<Value = Vec<Candle>> {
    prop::collection::vec((10.0..500.0_f64, 100.0..10_000.0_f64), 2..120).prop_map(|points| {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        points
            .into_iter()
            .enumerate()
            .map(|(i, (close, volume))| Candle {
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close * 1.01,
                low: close * 0.99,
                close,
                volume,
            })
            .collect()
    })
}

fn arb_strategy_kind() -> impl Strategy<Value = StrategyKind> {
    prop_oneof![
        Just(StrategyKind::EmaRsi),
        Just(StrategyKind::Macd),
        Just(StrategyKind::Volume),
        Just(StrategyKind::TripleEma),
    ]
}

fn config_for(kind: StrategyKind, days: usize) -> BacktestConfig {
    BacktestConfig {
        market: Market::Crypto,
        symbol: "PROP-USDT".into(),
        params: StrategyParams {
            strategy: kind,
            ..StrategyParams::default()
        },
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days(days as i64),
        initial_capital: 10_000.0,
    }
}

proptest! {
    /// Running the same backtest twice yields byte-identical JSON.
    #[test]
    fn backtest_is_deterministic(candles in arb_candles(), kind in arb_strategy_kind()) {
        let config = config_for(kind, candles.len());
        let a = serde_json::to_vec(&run_backtest(&candles, &config)).unwrap();
        let b = serde_json::to_vec(&run_backtest(&candles, &config)).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Sum of trade profits equals the capital delta, including the forced
    /// final close.
    #[test]
    fn ledger_reconciles_capital(candles in arb_candles(), kind in arb_strategy_kind()) {
        let config = config_for(kind, candles.len());
        let result = run_backtest(&candles, &config);
        let profit_sum: f64 = result.trades.iter().map(|t| t.profit).sum();
        prop_assert!(
            (result.final_capital - result.initial_capital - profit_sum).abs() < 1e-6
        );
    }

    /// At most one open position at a time: consecutive trades never overlap.
    #[test]
    fn positions_are_mutually_exclusive(candles in arb_candles(), kind in arb_strategy_kind()) {
        let config = config_for(kind, candles.len());
        let result = run_backtest(&candles, &config);
        for pair in result.trades.windows(2) {
            prop_assert!(pair[1].opened_at >= pair[0].closed_at);
        }
        for trade in &result.trades {
            prop_assert!(trade.closed_at >= trade.opened_at);
        }
    }

    /// The equity curve has exactly one point per processed bar plus the
    /// seed point at the start of the range.
    #[test]
    fn curve_length_matches_processed_bars(candles in arb_candles(), kind in arb_strategy_kind()) {
        let config = config_for(kind, candles.len());
        let warmup = config.params.warmup_period();
        let result = run_backtest(&candles, &config);
        let processed = candles.len().saturating_sub(warmup);
        prop_assert_eq!(result.equity_curve.len(), processed + 1);
    }

    /// Metrics stay finite whatever the series shape.
    #[test]
    fn metrics_are_finite(candles in arb_candles(), kind in arb_strategy_kind()) {
        let config = config_for(kind, candles.len());
        let m = run_backtest(&candles, &config).metrics;
        prop_assert!(m.net_profit.is_finite());
        prop_assert!(m.return_on_investment.is_finite());
        prop_assert!(m.win_rate.is_finite());
        prop_assert!(m.profit_factor.is_finite());
        prop_assert!(m.max_drawdown.is_finite());
        prop_assert!(m.sharpe_ratio.is_finite());
        prop_assert!((0.0..=100.0).contains(&m.win_rate));
        prop_assert!(m.max_drawdown >= 0.0);
    }
}
