//! End-to-end backtest flow: data source → engine → serialized result.
//!
//! Exercises the pieces together the way the CLI does: candles from a
//! source, a full run, the JSON wire shape, and a grid sweep on top.

use chrono::NaiveDate;

use quantbot_backtest::{grid_search, run_backtest, BacktestConfig, BacktestResult, ParamGrid};
use quantbot_core::data::{MarketDataSource, SyntheticDataSource};
use quantbot_core::domain::Market;
use quantbot_core::strategy::{StrategyKind, StrategyParams};

fn source() -> SyntheticDataSource {
    SyntheticDataSource::new("SYN-USDT", 99, 300, 100.0)
}

fn config() -> BacktestConfig {
    BacktestConfig {
        market: Market::Crypto,
        symbol: "SYN-USDT".into(),
        params: StrategyParams::default(),
        // Synthetic series starts 2024-01-01 and runs 300 days.
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 10, 26).unwrap(),
        initial_capital: 10_000.0,
    }
}

#[test]
fn source_to_result_round_trip() {
    let source = source();
    let candles = source
        .historical_candles("SYN-USDT", "1day", 1000)
        .expect("synthetic source always serves its symbol");
    let result = run_backtest(&candles, &config());

    // The wire shape survives a JSON round trip intact.
    let json = serde_json::to_string_pretty(&result).unwrap();
    let back: BacktestResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result, back);

    // Capital reconciles with the ledger.
    let profit_sum: f64 = result.trades.iter().map(|t| t.profit).sum();
    assert!((result.final_capital - result.initial_capital - profit_sum).abs() < 1e-6);
}

#[test]
fn repeated_runs_serialize_byte_identically() {
    let source = source();
    let candles = source.historical_candles("SYN-USDT", "1day", 1000).unwrap();

    let a = serde_json::to_vec(&run_backtest(&candles, &config())).unwrap();
    let b = serde_json::to_vec(&run_backtest(&candles, &config())).unwrap();
    assert_eq!(a, b);
}

#[test]
fn positions_never_overlap() {
    let source = source();
    let candles = source.historical_candles("SYN-USDT", "1day", 1000).unwrap();
    let result = run_backtest(&candles, &config());

    // One position at a time: each trade opens at or after the previous close.
    for pair in result.trades.windows(2) {
        assert!(
            pair[1].opened_at >= pair[0].closed_at,
            "trade opened at {} before prior close at {}",
            pair[1].opened_at,
            pair[0].closed_at
        );
    }
}

#[test]
fn equity_curve_is_monotonic_in_time() {
    let source = source();
    let candles = source.historical_candles("SYN-USDT", "1day", 1000).unwrap();
    let result = run_backtest(&candles, &config());

    assert!(result
        .equity_curve
        .windows(2)
        .all(|w| w[0].timestamp < w[1].timestamp));
}

#[test]
fn every_strategy_variant_completes() {
    let source = source();
    let candles = source.historical_candles("SYN-USDT", "1day", 1000).unwrap();

    for kind in [
        StrategyKind::EmaRsi,
        StrategyKind::Macd,
        StrategyKind::Volume,
        StrategyKind::TripleEma,
    ] {
        let mut cfg = config();
        cfg.params.strategy = kind;
        let result = run_backtest(&candles, &cfg);
        assert_eq!(result.strategy, kind);
        assert!(result.final_capital.is_finite());
        assert!(result.metrics.max_drawdown >= 0.0);
    }
}

#[test]
fn sweep_over_source_is_reproducible() {
    let source = source();
    let candles = source.historical_candles("SYN-USDT", "1day", 1000).unwrap();
    let grid = ParamGrid {
        ema_fast: vec![5, 9],
        ema_slow: vec![14, 21],
        rsi_period: vec![9, 14],
        risk_level: vec![1.0, 2.0],
    };

    let first = grid_search(&candles, &config(), &grid, true);
    let second = grid_search(&candles, &config(), &grid, true);

    let best_a = serde_json::to_vec(&first.best().unwrap().result).unwrap();
    let best_b = serde_json::to_vec(&second.best().unwrap().result).unwrap();
    assert_eq!(best_a, best_b);
    assert_eq!(first.len(), 16);
}
