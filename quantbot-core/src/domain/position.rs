//! Position and Trade — an open exposure and its closed round-trip record.

use super::signal::Side;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An open position on one symbol.
///
/// Created when the simulator or live bot opens a trade; the only mutation
/// is closing, which consumes the position into a [`Trade`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub side: Side,
    pub entry: f64,
    pub size: f64,
    /// Notional value committed at entry; unrealized pnl scales off this.
    /// Unit-sized live positions set `value = size * entry`, which makes the
    /// realized profit equal `(exit - entry) * sign * size`.
    pub value: f64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub opened_at: DateTime<Utc>,
}

impl Position {
    /// Side-adjusted unrealized pnl as a fraction of the entry price.
    pub fn pnl_percent(&self, current_price: f64) -> f64 {
        let price_change = (current_price - self.entry) / self.entry;
        self.side.sign() * price_change
    }

    /// Unrealized pnl in account currency.
    pub fn pnl_amount(&self, current_price: f64) -> f64 {
        self.value * self.pnl_percent(current_price)
    }

    /// Close the position at `exit` price, producing the trade record.
    pub fn close(self, exit: f64, closed_at: DateTime<Utc>) -> Trade {
        let profit_percent = self.pnl_percent(exit);
        let profit = self.value * profit_percent;
        Trade {
            symbol: self.symbol,
            side: self.side,
            entry: self.entry,
            size: self.size,
            value: self.value,
            opened_at: self.opened_at,
            exit,
            closed_at,
            profit,
            profit_percent,
        }
    }

}

/// A completed round-trip trade: entry through exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub symbol: String,
    pub side: Side,
    pub entry: f64,
    pub size: f64,
    pub value: f64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub opened_at: DateTime<Utc>,
    pub exit: f64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub closed_at: DateTime<Utc>,
    pub profit: f64,
    pub profit_percent: f64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.profit > 0.0
    }

    /// Holding time in seconds.
    pub fn hold_secs(&self) -> i64 {
        (self.closed_at - self.opened_at).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_position(side: Side) -> Position {
        Position {
            symbol: "BTC-USDT".into(),
            side,
            entry: 100.0,
            size: 500.0,
            value: 500.0,
            opened_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn long_pnl_tracks_price_up() {
        let pos = sample_position(Side::Buy);
        assert!((pos.pnl_percent(105.0) - 0.05).abs() < 1e-12);
        assert!((pos.pnl_amount(105.0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn short_pnl_inverts_price_change() {
        let pos = sample_position(Side::Sell);
        assert!((pos.pnl_percent(105.0) - (-0.05)).abs() < 1e-12);
        assert!((pos.pnl_percent(95.0) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn close_realizes_profit() {
        let pos = sample_position(Side::Buy);
        let closed_at = Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap();
        let trade = pos.close(110.0, closed_at);
        assert!((trade.profit - 50.0).abs() < 1e-12);
        assert!((trade.profit_percent - 0.10).abs() < 1e-12);
        assert_eq!(trade.exit, 110.0);
        assert!(trade.is_winner());
        assert_eq!(trade.hold_secs(), 2 * 24 * 3600);
    }

    #[test]
    fn zero_profit_trade_is_not_a_winner() {
        let pos = sample_position(Side::Buy);
        let trade = pos.close(100.0, Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap());
        assert_eq!(trade.profit, 0.0);
        assert!(!trade.is_winner());
    }
}
