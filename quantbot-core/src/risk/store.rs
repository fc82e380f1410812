//! Open-position store — the mutual-exclusion ledger for live trading.
//!
//! The store is injected into whatever drives live trades rather than held
//! as ambient state, so tests and multi-instance deployments each get their
//! own. At most one position may be open per (user, market, symbol) key;
//! `record_open` enforces that with a lookup before every open. Guarding the
//! check across processes is the deployment's concern, not the store's.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{Market, Position, Trade};

use super::RiskError;

/// Identity of one tradable slot: a user on a market symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub user_id: String,
    pub market: Market,
    pub symbol: String,
}

impl PositionKey {
    pub fn new(user_id: impl Into<String>, market: Market, symbol: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            market,
            symbol: symbol.into(),
        }
    }
}

/// Persistence sink for live position tracking.
///
/// Backtesting never touches this — the simulator owns its position
/// directly. Implementations may persist to a database; the in-memory store
/// below is the reference implementation and the test double.
pub trait PositionStore {
    /// True when no position is open for `key`.
    fn can_open(&self, key: &PositionKey) -> bool;

    /// The open position for `key`, if any.
    fn open_position(&self, key: &PositionKey) -> Option<&Position>;

    /// Record a newly opened position. Fails if one is already open for `key`.
    fn record_open(&mut self, key: PositionKey, position: Position) -> Result<(), RiskError>;

    /// Close the open position for `key` at `exit_price`, returning the
    /// completed trade with its realized profit. `None` when nothing was
    /// open. Unit-sized positions (`value = size * entry`) realize
    /// `(exit - entry) * side_sign * size`.
    fn record_close(
        &mut self,
        key: &PositionKey,
        exit_price: f64,
        closed_at: DateTime<Utc>,
    ) -> Option<Trade>;
}

/// HashMap-backed store, one entry per open key.
#[derive(Debug, Default)]
pub struct InMemoryPositionStore {
    positions: HashMap<PositionKey, Position>,
}

impl InMemoryPositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open positions across all keys.
    pub fn open_count(&self) -> usize {
        self.positions.len()
    }
}

impl PositionStore for InMemoryPositionStore {
    fn can_open(&self, key: &PositionKey) -> bool {
        !self.positions.contains_key(key)
    }

    fn open_position(&self, key: &PositionKey) -> Option<&Position> {
        self.positions.get(key)
    }

    fn record_open(&mut self, key: PositionKey, position: Position) -> Result<(), RiskError> {
        if !self.can_open(&key) {
            return Err(RiskError::PositionAlreadyOpen {
                user_id: key.user_id,
                market: key.market,
                symbol: key.symbol,
            });
        }
        self.positions.insert(key, position);
        Ok(())
    }

    fn record_close(
        &mut self,
        key: &PositionKey,
        exit_price: f64,
        closed_at: DateTime<Utc>,
    ) -> Option<Trade> {
        self.positions
            .remove(key)
            .map(|position| position.close(exit_price, closed_at))
    }
}
