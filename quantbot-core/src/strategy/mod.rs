//! Strategy variants and their parameters.
//!
//! Dispatch is a closed enum: adding a strategy means adding a variant and
//! satisfying the exhaustive matches in `detect` and `warmup_period`, not
//! growing a string table.

mod detect;

pub use detect::detect_trend;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bars of history the volume strategy needs before it evaluates.
pub const VOLUME_WARMUP: usize = 10;

/// The strategy variant a parameter set is bound to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// EMA crossover gated by an RSI band (the default).
    #[default]
    EmaRsi,
    /// MACD line vs its signal line.
    Macd,
    /// Volume-spike confirmation of short-term price direction.
    Volume,
    /// Three stacked EMAs in strict order.
    TripleEma,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::EmaRsi => write!(f, "ema-rsi"),
            StrategyKind::Macd => write!(f, "macd"),
            StrategyKind::Volume => write!(f, "volume"),
            StrategyKind::TripleEma => write!(f, "triple-ema"),
        }
    }
}

/// Numeric periods and thresholds for every strategy variant, bound to one
/// variant via `strategy`.
///
/// Immutable for the duration of a run; the optimizer stamps out one
/// instance per grid cell. Unspecified fields deserialize to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    pub strategy: StrategyKind,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub triple_fast: usize,
    pub triple_mid: usize,
    pub triple_slow: usize,
    /// Risk appetite on a 1–5 scale. Shifts the RSI entry band inward and
    /// scales live position sizing.
    pub risk_level: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::EmaRsi,
            ema_fast: 7,
            ema_slow: 14,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            triple_fast: 5,
            triple_mid: 15,
            triple_slow: 30,
            risk_level: 1.0,
        }
    }
}

impl StrategyParams {
    /// Minimum bar count before the bound strategy produces a non-Hold
    /// signal. Only the chosen variant's periods count.
    pub fn warmup_period(&self) -> usize {
        match self.strategy {
            StrategyKind::EmaRsi => self.ema_fast.max(self.ema_slow).max(self.rsi_period),
            StrategyKind::Macd => self.macd_fast.max(self.macd_slow).max(self.macd_signal),
            StrategyKind::Volume => VOLUME_WARMUP,
            StrategyKind::TripleEma => {
                self.triple_fast.max(self.triple_mid).max(self.triple_slow)
            }
        }
    }

    /// RSI ceiling for a buy entry: 70 shifted down 10 per risk step.
    pub fn rsi_buy_ceiling(&self) -> f64 {
        70.0 - 10.0 * (self.risk_level - 1.0)
    }

    /// RSI floor for a sell entry: 30 shifted up 10 per risk step.
    pub fn rsi_sell_floor(&self) -> f64 {
        30.0 + 10.0 * (self.risk_level - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bot_defaults() {
        let p = StrategyParams::default();
        assert_eq!(p.strategy, StrategyKind::EmaRsi);
        assert_eq!(p.ema_fast, 7);
        assert_eq!(p.ema_slow, 14);
        assert_eq!(p.rsi_period, 14);
        assert_eq!(p.macd_fast, 12);
        assert_eq!(p.macd_slow, 26);
        assert_eq!(p.macd_signal, 9);
        assert_eq!(p.triple_fast, 5);
        assert_eq!(p.triple_mid, 15);
        assert_eq!(p.triple_slow, 30);
        assert_eq!(p.risk_level, 1.0);
    }

    #[test]
    fn warmup_tracks_chosen_strategy_only() {
        let mut p = StrategyParams::default();
        assert_eq!(p.warmup_period(), 14); // ema-rsi: max(7, 14, 14)

        p.strategy = StrategyKind::Macd;
        assert_eq!(p.warmup_period(), 26); // max(12, 26, 9)

        p.strategy = StrategyKind::Volume;
        assert_eq!(p.warmup_period(), VOLUME_WARMUP);

        p.strategy = StrategyKind::TripleEma;
        assert_eq!(p.warmup_period(), 30); // max(5, 15, 30)
    }

    #[test]
    fn rsi_band_shifts_with_risk() {
        let mut p = StrategyParams::default();
        assert_eq!(p.rsi_buy_ceiling(), 70.0);
        assert_eq!(p.rsi_sell_floor(), 30.0);

        p.risk_level = 3.0;
        assert_eq!(p.rsi_buy_ceiling(), 50.0);
        assert_eq!(p.rsi_sell_floor(), 50.0);
    }

    #[test]
    fn kind_serde_kebab_case() {
        assert_eq!(
            serde_json::to_string(&StrategyKind::TripleEma).unwrap(),
            "\"triple-ema\""
        );
        let k: StrategyKind = serde_json::from_str("\"ema-rsi\"").unwrap();
        assert_eq!(k, StrategyKind::EmaRsi);
    }

    #[test]
    fn params_deserialize_with_partial_fields() {
        let p: StrategyParams =
            serde_json::from_str(r#"{"strategy":"macd","macd_fast":8}"#).unwrap();
        assert_eq!(p.strategy, StrategyKind::Macd);
        assert_eq!(p.macd_fast, 8);
        assert_eq!(p.macd_slow, 26); // default fills the rest
    }
}
