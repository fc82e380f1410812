//! Indicator library — pure numeric functions over a close series.

pub mod ema;
pub mod rsi;

pub use ema::ema;
pub use rsi::rsi;

#[cfg(test)]
pub(crate) const DEFAULT_EPSILON: f64 = 1e-9;

#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "expected {expected}, got {actual}"
    );
}
