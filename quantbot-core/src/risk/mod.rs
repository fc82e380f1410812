//! Position sizing, trade management, and the open-position store.

pub mod sizing;
pub mod store;
pub mod trade;

pub use sizing::size_position;
pub use store::{InMemoryPositionStore, PositionKey, PositionStore};
pub use trade::{
    manage_trade, trailing_stop_hit, CloseReason, TradeAction, DEFAULT_STOP_LOSS,
    DEFAULT_TARGET_PROFIT,
};

use thiserror::Error;

use crate::domain::Market;

/// Errors from the risk layer.
#[derive(Debug, Error, PartialEq)]
pub enum RiskError {
    /// No current price quote was available; the caller decides whether to retry.
    #[error("could not fetch current price for '{symbol}'")]
    PriceUnavailable { symbol: String },

    /// The mutual-exclusion invariant: one open position per key.
    #[error("position already open for user '{user_id}' on {market} {symbol}")]
    PositionAlreadyOpen {
        user_id: String,
        market: Market,
        symbol: String,
    },
}
