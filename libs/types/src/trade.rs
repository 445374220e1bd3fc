//! Trade execution records
//!
//! A trade is the immutable result of a single fill between a buy and a
//! sell order. Besides the executed price and quantity it snapshots each
//! side's submitted price, type, and time-in-force so a recorded stream can
//! later be audited or replayed without the order records themselves.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use crate::order::{Order, OrderType, TimeInForce};
use serde::{Deserialize, Serialize};

/// A single fill between two orders
///
/// The executed price is always the resting order's price; price
/// improvement accrues to the aggressor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,

    // Per-side snapshots for audit and replay
    pub buy_price: Price,
    pub buy_order_type: OrderType,
    pub buy_time_in_force: TimeInForce,
    pub sell_price: Price,
    pub sell_order_type: OrderType,
    pub sell_time_in_force: TimeInForce,
}

impl Trade {
    /// Build a trade between a buy and a sell order
    ///
    /// Callers assign `buy`/`sell` by order side regardless of which was
    /// the aggressor.
    pub fn between(buy: &Order, sell: &Order, price: Price, quantity: Quantity) -> Self {
        Self {
            buy_order_id: buy.order_id(),
            sell_order_id: sell.order_id(),
            price,
            quantity,
            buy_price: buy.price(),
            buy_order_type: buy.order_type(),
            buy_time_in_force: buy.time_in_force(),
            sell_price: sell.price(),
            sell_order_type: sell.order_type(),
            sell_time_in_force: sell.time_in_force(),
        }
    }
}
