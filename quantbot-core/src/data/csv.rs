//! CSV-backed candle source.
//!
//! One source serves one symbol from one file. Expected header:
//! `timestamp,open,high,low,close,volume` with unix-second timestamps.
//! Rows are sorted ascending on load, so downstream consumers always see
//! ordered data regardless of file order.

use std::path::Path;

use crate::domain::Candle;

use super::{DataError, MarketDataSource};

/// Candle source reading a single symbol's history from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    symbol: String,
    candles: Vec<Candle>,
}

impl CsvDataSource {
    /// Load and sort the file's candles for `symbol`.
    pub fn from_path(symbol: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, DataError> {
        let symbol = symbol.into();
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let mut candles = Vec::new();
        for row in reader.deserialize::<Candle>() {
            candles.push(row?);
        }
        if candles.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.clone(),
            });
        }
        candles.sort_by_key(|c| c.timestamp);
        Ok(Self { symbol, candles })
    }

    /// Build a source from candles already in memory (sorted on entry).
    pub fn from_candles(symbol: impl Into<String>, mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.timestamp);
        Self {
            symbol: symbol.into(),
            candles,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Every loaded candle, ascending.
    pub fn all_candles(&self) -> &[Candle] {
        &self.candles
    }
}

impl MarketDataSource for CsvDataSource {
    fn historical_candles(
        &self,
        symbol: &str,
        _timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, DataError> {
        if symbol != self.symbol {
            return Err(DataError::UnknownSymbol {
                requested: symbol.to_string(),
                available: self.symbol.clone(),
            });
        }
        let start = self.candles.len().saturating_sub(limit);
        Ok(self.candles[start..].to_vec())
    }

    fn current_price(&self, symbol: &str) -> Option<f64> {
        if symbol != self.symbol {
            return None;
        }
        self.candles.last().map(|c| c.close)
    }
}
