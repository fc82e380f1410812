//! Market data source trait and structured error types.
//!
//! The `MarketDataSource` trait abstracts over candle providers (CSV files,
//! synthetic series, live exchange feeds out of tree) so the engine and CLI
//! can swap implementations and mock for tests. Sources hand out candles
//! sorted ascending by timestamp; the engine trusts that ordering.

pub mod csv;
pub mod synthetic;

pub use self::csv::CsvDataSource;
pub use synthetic::SyntheticDataSource;

use thiserror::Error;

use crate::domain::Candle;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read candle file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed candle row: {0}")]
    MalformedRow(#[from] ::csv::Error),

    #[error("source serves '{available}', not '{requested}'")]
    UnknownSymbol {
        requested: String,
        available: String,
    },

    #[error("no candles available for '{symbol}'")]
    NoData { symbol: String },
}

/// A provider of historical candles and current price quotes.
pub trait MarketDataSource: Send + Sync {
    /// Up to `limit` of the most recent candles for `symbol` at the given
    /// timeframe, ascending by timestamp. May return fewer than requested.
    fn historical_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, DataError>;

    /// Latest price for `symbol`; `None` when no quote is available.
    fn current_price(&self, symbol: &str) -> Option<f64>;
}
