//! Open-trade management: target-profit, stop-loss, and trailing-stop checks.

use crate::domain::Position;

use super::RiskError;

/// Default live take-profit threshold (fraction of entry).
pub const DEFAULT_TARGET_PROFIT: f64 = 0.05;
/// Default live stop-loss threshold (fraction of entry).
pub const DEFAULT_STOP_LOSS: f64 = 0.03;

/// Why a position was told to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    TargetProfit,
    StopLoss,
}

impl CloseReason {
    pub fn message(&self) -> &'static str {
        match self {
            CloseReason::TargetProfit => "Target profit reached",
            CloseReason::StopLoss => "Stop loss hit",
        }
    }
}

/// The decision for an open position at the current price.
#[derive(Debug, Clone, PartialEq)]
pub enum TradeAction {
    /// Close now at `price`; `pnl` is the side-adjusted fractional result.
    Close {
        reason: CloseReason,
        price: f64,
        pnl: f64,
    },
    /// Keep holding; `pnl` reports the unrealized side-adjusted fraction.
    Hold { price: f64, pnl: f64 },
}

/// Evaluate an open position against the current price.
///
/// `current_price` is `None` when the quote source had nothing — that is a
/// retryable error, distinct from a hold. Thresholds are fractions of the
/// entry price; live callers tune them per user, unlike the backtester's
/// fixed baseline.
pub fn manage_trade(
    position: &Position,
    current_price: Option<f64>,
    target_profit: f64,
    stop_loss: f64,
) -> Result<TradeAction, RiskError> {
    let price = current_price.ok_or_else(|| RiskError::PriceUnavailable {
        symbol: position.symbol.clone(),
    })?;

    let pnl = position.pnl_percent(price);

    if pnl >= target_profit {
        Ok(TradeAction::Close {
            reason: CloseReason::TargetProfit,
            price,
            pnl,
        })
    } else if pnl <= -stop_loss {
        Ok(TradeAction::Close {
            reason: CloseReason::StopLoss,
            price,
            pnl,
        })
    } else {
        Ok(TradeAction::Hold { price, pnl })
    }
}

/// Trailing-stop check for a long position.
///
/// The stop trails the highest price seen since entry by `trailing_percent`.
/// It only fires above the entry price — locking in gains is its job; losses
/// below entry belong to the hard stop.
pub fn trailing_stop_hit(
    entry_price: f64,
    current_price: f64,
    trailing_percent: f64,
    highest_since_entry: f64,
) -> bool {
    let trail_stop = highest_since_entry * (1.0 - trailing_percent / 100.0);
    current_price <= trail_stop && current_price > entry_price
}
