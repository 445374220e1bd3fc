//! Fill-or-kill dry-run planner
//!
//! A fill-or-kill order either fills completely or produces zero fills,
//! but the walk mutates the book as it goes, so all-or-nothing needs two
//! phases: a read-only scan that proves the full quantity is reachable and
//! collects the orders that would fill it, then a commit that replays
//! exactly that set. This module is the first phase.

use crate::book::{NodeHandle, OrderBook};
use crate::matching::crossing;
use types::order::{Order, OrderType};

/// Scan the opposite side for a full fill of `incoming`
///
/// Walks levels in priority order, accumulating resting orders until the
/// incoming quantity is covered. For a limit order the scan stops at the
/// first level that fails the price predicate (deeper levels are only
/// worse); a market order may reach every non-empty level. Returns the
/// trial set in fill order, or `None` when the full quantity is
/// unreachable.
pub(crate) fn plan_full_fill(book: &OrderBook, incoming: &Order) -> Option<Vec<NodeHandle>> {
    let mut entries = Vec::new();
    let mut needed = incoming.initial_quantity();

    for (price, level) in book.side_levels(incoming.side().opposite()) {
        if incoming.order_type() == OrderType::Limit
            && !crossing::crosses(incoming.side(), incoming.price(), price)
        {
            break;
        }

        if level.total_quantity() < needed {
            // Whole level gets consumed
            entries.extend(book.handles_at(level));
            needed -= level.total_quantity();
        } else {
            // Last level: take front orders until the quantity is covered
            for handle in book.handles_at(level) {
                if needed.is_zero() {
                    break;
                }
                let take = needed.min(book.order(handle).remaining_quantity());
                entries.push(handle);
                needed -= take;
            }
        }

        if needed.is_zero() {
            break;
        }
    }

    if needed.is_zero() {
        Some(entries)
    } else {
        None
    }
}
