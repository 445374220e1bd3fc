//! Order lifecycle types
//!
//! An order record carries its identity and parameters plus the mutable
//! lifecycle state (remaining quantity, status). Records are recycled
//! through the engine's pool, so every field is overwritten on reuse.

use crate::errors::OrderError;
use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order execution type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Execute only at the limit price or better
    Limit,
    /// Execute at the best available price; the price field is ignored
    Market,
}

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Time-in-force policy for orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Remains resting until filled or explicitly cancelled
    GoodTillCancel,
    /// Match what is available now; cancel any residual
    ImmediateOrCancel,
    /// Fully filled immediately or cancelled with zero fills
    FillOrKill,
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// No fills yet
    New,
    /// Partially filled; remainder still live
    Partial,
    /// Completely filled (terminal)
    Filled,
    /// Cancelled by the submitter or by time-in-force policy (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Check if the status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

/// Submission parameters for a new order
///
/// Plain data handed to the gateway; the engine turns it into a pooled
/// order record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order_id: OrderId,
    pub order_type: OrderType,
    pub side: Side,
    pub time_in_force: TimeInForce,
    pub price: Price,
    pub quantity: Quantity,
}

impl OrderRequest {
    /// A limit order request
    pub fn limit(
        order_id: OrderId,
        side: Side,
        time_in_force: TimeInForce,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            order_id,
            order_type: OrderType::Limit,
            side,
            time_in_force,
            price,
            quantity,
        }
    }

    /// A market order request; carries the zero price sentinel, which the
    /// engine never reads
    pub fn market(
        order_id: OrderId,
        side: Side,
        time_in_force: TimeInForce,
        quantity: Quantity,
    ) -> Self {
        Self {
            order_id,
            order_type: OrderType::Market,
            side,
            time_in_force,
            price: Price::ZERO,
            quantity,
        }
    }
}

/// A live order record
///
/// Fields are private: lifecycle state only moves through `fill` and
/// `cancel`, which keep the quantity/status invariants. Records are
/// allocated and recycled by the pool and owned by the engine (while
/// matching) or the book (while resting).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    order_id: OrderId,
    order_type: OrderType,
    side: Side,
    time_in_force: TimeInForce,
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
    status: OrderStatus,
}

impl Order {
    /// Create a new order with status `New`
    pub fn new(
        order_id: OrderId,
        order_type: OrderType,
        side: Side,
        time_in_force: TimeInForce,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            order_id,
            order_type,
            side,
            time_in_force,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
            status: OrderStatus::New,
        }
    }

    /// Create an order from submission parameters
    pub fn from_request(req: &OrderRequest) -> Self {
        Self::new(
            req.order_id,
            req.order_type,
            req.side,
            req.time_in_force,
            req.price,
            req.quantity,
        )
    }

    /// Overwrite every field from fresh submission parameters
    ///
    /// Used by the pool when recycling a record; release never clears
    /// fields, so stale state is only ever observable inside the pool.
    pub fn reset(&mut self, req: &OrderRequest) {
        self.order_id = req.order_id;
        self.order_type = req.order_type;
        self.side = req.side;
        self.time_in_force = req.time_in_force;
        self.price = req.price;
        self.initial_quantity = req.quantity;
        self.remaining_quantity = req.quantity;
        self.status = OrderStatus::New;
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn time_in_force(&self) -> TimeInForce {
        self.time_in_force
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    /// Quantity filled so far
    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Check if the order is completely filled
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity.is_zero()
    }

    /// Fill the order by `quantity`
    ///
    /// A zero fill is a no-op. Filling more than the remaining quantity is
    /// an invariant violation and fails with `IllegalFill`.
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), OrderError> {
        if quantity.is_zero() {
            return Ok(());
        }
        if quantity > self.remaining_quantity {
            return Err(OrderError::IllegalFill {
                id: self.order_id,
                fill: quantity,
                remaining: self.remaining_quantity,
            });
        }

        self.remaining_quantity -= quantity;
        self.status = if self.remaining_quantity.is_zero() {
            OrderStatus::Filled
        } else {
            OrderStatus::Partial
        };
        Ok(())
    }

    /// Cancel the order
    ///
    /// Cancelling an already-cancelled order is idempotent. Cancelling a
    /// filled order fails with `IllegalTransition`.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        if self.status == OrderStatus::Filled {
            return Err(OrderError::IllegalTransition { id: self.order_id });
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit_order(id: u64, qty: u32) -> Order {
        Order::new(
            OrderId::new(id),
            OrderType::Limit,
            Side::Buy,
            TimeInForce::GoodTillCancel,
            Price::new(100),
            Quantity::new(qty),
        )
    }

    #[test]
    fn test_order_creation() {
        let order = limit_order(1, 50);
        assert_eq!(order.status(), OrderStatus::New);
        assert_eq!(order.remaining_quantity(), Quantity::new(50));
        assert_eq!(order.filled_quantity(), Quantity::ZERO);
        assert!(!order.is_filled());
    }

    #[test]
    fn test_order_fill_transitions() {
        let mut order = limit_order(1, 50);

        // Partial fill
        order.fill(Quantity::new(20)).unwrap();
        assert_eq!(order.status(), OrderStatus::Partial);
        assert_eq!(order.remaining_quantity(), Quantity::new(30));
        assert_eq!(order.filled_quantity(), Quantity::new(20));

        // Complete fill
        order.fill(Quantity::new(30)).unwrap();
        assert_eq!(order.status(), OrderStatus::Filled);
        assert!(order.is_filled());
        assert_eq!(order.filled_quantity(), Quantity::new(50));
    }

    #[test]
    fn test_zero_fill_is_noop() {
        let mut order = limit_order(1, 50);
        order.fill(Quantity::ZERO).unwrap();
        assert_eq!(order.status(), OrderStatus::New);
        assert_eq!(order.remaining_quantity(), Quantity::new(50));
    }

    #[test]
    fn test_overfill_fails() {
        let mut order = limit_order(7, 20);
        let err = order.fill(Quantity::new(30)).unwrap_err();
        assert_eq!(
            err,
            OrderError::IllegalFill {
                id: OrderId::new(7),
                fill: Quantity::new(30),
                remaining: Quantity::new(20),
            }
        );
        // State untouched on failure
        assert_eq!(order.status(), OrderStatus::New);
        assert_eq!(order.remaining_quantity(), Quantity::new(20));
    }

    #[test]
    fn test_cancel() {
        let mut order = limit_order(1, 50);
        order.cancel().unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert!(order.status().is_terminal());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut order = limit_order(1, 50);
        order.cancel().unwrap();
        order.cancel().unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancel_filled_fails() {
        let mut order = limit_order(400, 10);
        order.fill(Quantity::new(10)).unwrap();
        let err = order.cancel().unwrap_err();
        assert_eq!(err, OrderError::IllegalTransition { id: OrderId::new(400) });
        assert_eq!(order.status(), OrderStatus::Filled);
    }

    #[test]
    fn test_cancel_partial() {
        let mut order = limit_order(1, 50);
        order.fill(Quantity::new(20)).unwrap();
        order.cancel().unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);
        // Filled quantity is preserved through cancellation
        assert_eq!(order.filled_quantity(), Quantity::new(20));
    }

    #[test]
    fn test_reset_overwrites_all_fields() {
        let mut order = limit_order(1, 50);
        order.fill(Quantity::new(50)).unwrap();

        let req = OrderRequest::market(
            OrderId::new(2),
            Side::Sell,
            TimeInForce::ImmediateOrCancel,
            Quantity::new(75),
        );
        order.reset(&req);

        assert_eq!(order.order_id(), OrderId::new(2));
        assert_eq!(order.order_type(), OrderType::Market);
        assert_eq!(order.side(), Side::Sell);
        assert_eq!(order.time_in_force(), TimeInForce::ImmediateOrCancel);
        assert_eq!(order.price(), Price::ZERO);
        assert_eq!(order.initial_quantity(), Quantity::new(75));
        assert_eq!(order.remaining_quantity(), Quantity::new(75));
        assert_eq!(order.status(), OrderStatus::New);
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_order_serialization() {
        let order = limit_order(11, 25);
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }
}
