//! Domain types shared across the signal engine and the backtester.

pub mod candle;
pub mod market;
pub mod position;
pub mod signal;

pub use candle::Candle;
pub use market::Market;
pub use position::{Position, Trade};
pub use signal::{Side, Signal};
