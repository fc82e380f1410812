//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[i] = price[i] * k + EMA[i-1] * (1 - k), k = 2 / (period + 1).
//! Seed: EMA[0] = price[0]. Every index has a value, so the output length
//! always equals the input length.

/// Compute the EMA series for `prices` with the given `period`.
///
/// Returns an empty vector for empty input; callers are expected to guard
/// with their strategy's warmup requirement before trusting early values.
pub fn ema(prices: &[f64], period: usize) -> Vec<f64> {
    if prices.is_empty() {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(prices.len());
    let mut prev = prices[0];
    out.push(prev);

    for &price in &prices[1..] {
        prev = price * k + prev * (1.0 - k);
        out.push(prev);
    }

    out
}
