//! Trade execution logic
//!
//! Guards a single fill between an incoming and a resting order and builds
//! the trade record. The guards are the engine's internal consistency
//! checks: a same-side pairing or a cancelled participant means an
//! invariant upstream is broken, and the operation aborts.

use types::errors::MatchError;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderStatus, Side};
use types::trade::Trade;

/// Verify that a fill between these two orders is legal
pub(crate) fn guard_fill(incoming: &Order, resting: &Order) -> Result<(), MatchError> {
    if incoming.side() == resting.side() {
        return Err(MatchError::SameSide {
            incoming: incoming.order_id(),
            resting: resting.order_id(),
        });
    }
    if resting.status() == OrderStatus::Cancelled {
        return Err(MatchError::RestingCancelled {
            resting: resting.order_id(),
        });
    }
    if incoming.status() == OrderStatus::Cancelled {
        return Err(MatchError::IncomingCancelled {
            incoming: incoming.order_id(),
        });
    }
    Ok(())
}

/// Build the trade record, assigning buy/sell by order side
///
/// The executed price is the resting order's price regardless of which
/// side was the aggressor.
pub(crate) fn trade_between(
    incoming: &Order,
    resting: &Order,
    price: Price,
    quantity: Quantity,
) -> Trade {
    match incoming.side() {
        Side::Buy => Trade::between(incoming, resting, price, quantity),
        Side::Sell => Trade::between(resting, incoming, price, quantity),
    }
}
