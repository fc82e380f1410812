//! Signal and Side — trend-detection output and position direction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trend-detection output for the latest bar.
///
/// A signal carries no memory of prior signals; each evaluation looks only
/// at the candle history it is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// True for Buy or Sell — the signals that open a position.
    pub fn is_entry(&self) -> bool {
        matches!(self, Signal::Buy | Signal::Sell)
    }

    /// The position side this signal opens, if any.
    pub fn entry_side(&self) -> Option<Side> {
        match self {
            Signal::Buy => Some(Side::Buy),
            Signal::Sell => Some(Side::Sell),
            Signal::Hold => None,
        }
    }

    /// True when this signal points against an open position's side.
    pub fn opposes(&self, side: Side) -> bool {
        matches!(
            (self, side),
            (Signal::Sell, Side::Buy) | (Signal::Buy, Side::Sell)
        )
    }
}

/// Direction of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// +1 for long, -1 for short. Multiplies raw price change into pnl.
    pub fn sign(&self) -> f64 {
        match self {
            Side::Buy => 1.0,
            Side::Sell => -1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}
