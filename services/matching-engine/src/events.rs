//! Result and report structures for the admission layer
//!
//! What the gateway hands back to submitters, and the execution snapshot
//! the engine reports when an order leaves its hands.

use serde::{Deserialize, Serialize};
use types::ids::OrderId;
use types::numeric::Quantity;
use types::order::OrderStatus;

/// Why a submission was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// Accepted; no rejection
    None,
    /// Zero price on a limit order
    InvalidPrice,
    /// Zero quantity
    InvalidQuantity,
    /// Unsupported type/time-in-force combination (market + good-till-cancel)
    InvalidTif,
    /// Immediate-or-cancel or fill-or-kill order that could not fill fully
    InsufficientLiquidity,
    /// Internal engine failure
    Other,
}

/// Gateway response for a submit or cancel request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: OrderId,
    pub accepted: bool,
    pub reason: RejectReason,
}

impl OrderResult {
    /// An accepted result
    pub fn accepted(order_id: OrderId) -> Self {
        Self {
            order_id,
            accepted: true,
            reason: RejectReason::None,
        }
    }

    /// A rejected result with its reason
    pub fn rejected(order_id: OrderId, reason: RejectReason) -> Self {
        Self {
            order_id,
            accepted: false,
            reason,
        }
    }
}

/// Snapshot of an order's state when `on_new_order` returns
///
/// Terminal records go back to the pool before the call returns, so their
/// final state is reported by value; resting orders stay observable
/// through the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub filled_quantity: Quantity,
    pub remaining_quantity: Quantity,
}
