//! Risk-based position sizing.

use crate::domain::Market;

/// Size a new position from account risk parameters.
///
/// `risk_level` is clamped to the 1–5 scale and read as a percentage of the
/// available balance to put at risk; the stop-loss distance converts that
/// risk budget into a position size. The result is bounded by the market's
/// minimum order size and its cap as a fraction of available balance — the
/// minimum wins when the two conflict, matching exchange behavior for tiny
/// accounts.
pub fn size_position(
    available_balance: f64,
    risk_level: f64,
    stop_loss_percent: f64,
    market: Market,
) -> f64 {
    let risk_pct = risk_level.clamp(1.0, 5.0);
    let risk_amount = available_balance * risk_pct / 100.0;
    let raw_size = risk_amount / (stop_loss_percent / 100.0);

    let cap = available_balance * market.position_cap_pct();
    raw_size.min(cap).max(market.min_position_size())
}
