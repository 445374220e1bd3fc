//! Crossing detection logic
//!
//! Determines when an incoming order can trade against the opposite side.
//! A limit order crosses while the best opposite price is at or better
//! than its limit; a market order crosses whenever the opposite side is
//! non-empty (its price field is never read).

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and an ask can match at the given prices
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming limit price crosses a resting price
///
/// A buy crosses resting asks at or below its limit; a sell crosses
/// resting bids at or above its limit.
pub fn crosses(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::Buy => can_match(incoming_price, resting_price),
        Side::Sell => can_match(resting_price, incoming_price),
    }
}
