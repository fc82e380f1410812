//! Synthetic candle source — seeded random walks for tests, benches, demos.
//!
//! Deterministic: the same seed always yields the same series, so fixtures
//! built on it are reproducible. Never used by the engine itself.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Candle;

use super::{DataError, MarketDataSource};

/// First timestamp of every generated series. Fixed so generation never
/// touches the wall clock.
fn series_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Generate `count` daily candles as a random walk from `start_price`.
///
/// Daily drift is uniform in ±2%, volume in [500, 5000). Highs and lows
/// bracket the open/close by up to 1%.
pub fn generate_candles(seed: u64, count: usize, start_price: f64) -> Vec<Candle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = start_price;
    let start = series_start();

    (0..count)
        .map(|i| {
            let open = price;
            let drift: f64 = rng.gen_range(-0.02..0.02);
            let close = (open * (1.0 + drift)).max(0.01);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500.0..5000.0);
            price = close;

            Candle {
                timestamp: start + Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume,
            }
        })
        .collect()
}

/// In-memory source serving one synthetic symbol.
#[derive(Debug, Clone)]
pub struct SyntheticDataSource {
    symbol: String,
    candles: Vec<Candle>,
}

impl SyntheticDataSource {
    pub fn new(symbol: impl Into<String>, seed: u64, count: usize, start_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            candles: generate_candles(seed, count, start_price),
        }
    }

    pub fn all_candles(&self) -> &[Candle] {
        &self.candles
    }
}

impl MarketDataSource for SyntheticDataSource {
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
