//! Market — crypto vs forex, with per-market sizing bounds and pair lists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which market a symbol trades on.
///
/// The market determines position-size bounds (exchanges enforce different
/// minimum order sizes) and which symbols count as major pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Crypto,
    Forex,
}

/// Major crypto pairs the bot is allowed to trade.
pub const CRYPTO_MAJOR_PAIRS: [&str; 10] = [
    "BTC-USDT", "ETH-USDT", "BNB-USDT", "SOL-USDT", "ADA-USDT",
    "XRP-USDT", "DOGE-USDT", "AVAX-USDT", "MATIC-USDT", "DOT-USDT",
];

/// Major forex pairs the bot is allowed to trade.
pub const FOREX_MAJOR_PAIRS: [&str; 10] = [
    "EURUSD", "USDJPY", "GBPUSD", "USDCHF", "AUDUSD",
    "USDCAD", "NZDUSD", "EURJPY", "GBPJPY", "EURGBP",
];

impl Market {
    /// Minimum position size the market will accept.
    pub fn min_position_size(&self) -> f64 {
        match self {
            Market::Crypto => 0.001,
            Market::Forex => 0.01,
        }
    }

    /// Cap on a single position as a fraction of available balance.
    pub fn position_cap_pct(&self) -> f64 {
        match self {
            Market::Crypto => 0.05,
            Market::Forex => 0.02,
        }
    }

    /// Major pairs tradable on this market.
    pub fn major_pairs(&self) -> &'static [&'static str] {
        match self {
            Market::Crypto => &CRYPTO_MAJOR_PAIRS,
            Market::Forex => &FOREX_MAJOR_PAIRS,
        }
    }

    /// Whether `symbol` is in this market's major-pair list.
    pub fn is_major_pair(&self, symbol: &str) -> bool {
        self.major_pairs().contains(&symbol)
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::Crypto => write!(f, "crypto"),
            Market::Forex => write!(f, "forex"),
        }
    }
}
