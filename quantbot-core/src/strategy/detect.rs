//! Trend detection — candles plus parameters in, one signal out.
//!
//! Every branch is a total function: insufficient history yields Hold, never
//! an error. Only the latest bar's indicator values decide the signal.

use crate::domain::candle::closes;
use crate::domain::{Candle, Signal};
use crate::indicators::{ema, rsi};

use super::{StrategyKind, StrategyParams, VOLUME_WARMUP};

/// Volume must exceed this multiple of the rolling average to count as a spike.
const VOLUME_SPIKE_FACTOR: f64 = 1.5;
/// Bars in the short price-direction window.
const VOLUME_PRICE_WINDOW: usize = 5;
/// Divisor for the rolling average volume. Histories shorter than this still
/// divide by the full constant, damping the average rather than erroring.
const VOLUME_AVG_WINDOW: usize = 20;

/// Evaluate the strategy bound in `params` against the candle history,
/// returning the decision for the latest bar.
pub fn detect_trend(candles: &[Candle], params: &StrategyParams) -> Signal {
    match params.strategy {
        StrategyKind::EmaRsi => ema_rsi_signal(candles, params),
        StrategyKind::Macd => macd_signal(candles, params),
        StrategyKind::Volume => volume_signal(candles),
        StrategyKind::TripleEma => triple_ema_signal(candles, params),
    }
}

/// EMA crossover gated by an RSI band.
///
/// Buy: fast above slow with RSI under the (risk-shifted) ceiling.
/// Sell: fast below slow with RSI over the (risk-shifted) floor.
fn ema_rsi_signal(candles: &[Candle], params: &StrategyParams) -> Signal {
    if candles.len() < params.warmup_period() {
        return Signal::Hold;
    }
    let prices = closes(candles);
    let fast = ema(&prices, params.ema_fast);
    let slow = ema(&prices, params.ema_slow);
    let momentum = rsi(&prices, params.rsi_period);
    let last = prices.len() - 1;

    // A NaN RSI (history shorter than period + 1) fails both comparisons.
    if fast[last] > slow[last] && momentum[last] < params.rsi_buy_ceiling() {
        Signal::Buy
    } else if fast[last] < slow[last] && momentum[last] > params.rsi_sell_floor() {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// MACD line vs its signal line at the latest bar.
fn macd_signal(candles: &[Candle], params: &StrategyParams) -> Signal {
    if candles.len() < params.warmup_period() {
        return Signal::Hold;
    }
    let prices = closes(candles);
    let fast = ema(&prices, params.macd_fast);
    let slow = ema(&prices, params.macd_slow);
    let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal_line = ema(&macd_line, params.macd_signal);
    let last = prices.len() - 1;

    if macd_line[last] > signal_line[last] {
        Signal::Buy
    } else if macd_line[last] < signal_line[last] {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Volume spike confirming short-term price direction.
fn volume_signal(candles: &[Candle]) -> Signal {
    if candles.len() < VOLUME_WARMUP {
        return Signal::Hold;
    }
    let recent = &candles[candles.len() - VOLUME_PRICE_WINDOW..];
    let avg_start = candles.len().saturating_sub(VOLUME_AVG_WINDOW);
    let avg_volume: f64 = candles[avg_start..].iter().map(|c| c.volume).sum::<f64>()
        / VOLUME_AVG_WINDOW as f64;

    let last = &recent[recent.len() - 1];
    let spiked = last.volume > VOLUME_SPIKE_FACTOR * avg_volume;

    if spiked && last.close > recent[0].close {
        Signal::Buy
    } else if spiked && last.close < recent[0].close {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Three EMAs in strict order: fast > mid > slow buys, the inverse sells.
fn triple_ema_signal(candles: &[Candle], params: &StrategyParams) -> Signal {
    if candles.len() < params.warmup_period() {
        return Signal::Hold;
    }
    let prices = closes(candles);
    let fast = ema(&prices, params.triple_fast);
    let mid = ema(&prices, params.triple_mid);
    let slow = ema(&prices, params.triple_slow);
    let last = prices.len() - 1;

    if fast[last] > mid[last] && mid[last] > slow[last] {
        Signal::Buy
    } else if fast[last] < mid[last] && mid[last] < slow[last] {
        Signal::Sell
    } else {
        Signal::Hold
    }
}
