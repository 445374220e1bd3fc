//! Order book infrastructure module
//!
//! A dual-sided price-level container: bids iterate descending, asks
//! ascending, each level a FIFO queue in arrival order. Resting records
//! live in a slab arena; an id index maps straight to the arena handle, so
//! cancellation costs one hash lookup plus an O(1) unlink and an O(log P)
//! level erase.

pub mod price_level;

pub use price_level::PriceLevel;

pub(crate) use price_level::{NodeHandle, OrderNode};

use slab::Slab;
use std::collections::{btree_map, BTreeMap, HashMap};
use std::iter::Rev;
use types::errors::BookError;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// Two price-indexed sides plus an id index over a shared node arena
///
/// Invariants kept by construction: a resting order appears in exactly one
/// side's FIFO and in the index; a price key exists iff its level is
/// non-empty; only non-terminal records rest.
#[derive(Debug, Default)]
pub struct OrderBook {
    /// Buy levels; best bid is the highest key
    bids: BTreeMap<Price, PriceLevel>,
    /// Sell levels; best ask is the lowest key
    asks: BTreeMap<Price, PriceLevel>,
    /// Node storage shared by both sides
    arena: Slab<OrderNode>,
    /// order id → arena handle
    index: HashMap<OrderId, NodeHandle>,
}

impl OrderBook {
    /// Create an empty order book
    pub fn new() -> Self {
        Self::default()
    }

    /// Rest an order at the tail of its price level
    ///
    /// Creates the level if absent. Rejects ids that are already indexed
    /// and records in a terminal state; residuals of partially filled
    /// good-till-cancel orders rest with status `Partial`.
    pub fn add(&mut self, order: Box<Order>) -> Result<(), BookError> {
        let id = order.order_id();
        if self.index.contains_key(&id) {
            return Err(BookError::DuplicateOrder { id });
        }
        if order.status().is_terminal() {
            return Err(BookError::Terminal { id });
        }

        let side = order.side();
        let price = order.price();
        let handle = self.arena.insert(OrderNode::new(order));

        let level = match side {
            Side::Buy => self.bids.entry(price),
            Side::Sell => self.asks.entry(price),
        }
        .or_default();
        level.push_back(&mut self.arena, handle);

        self.index.insert(id, handle);
        Ok(())
    }

    /// Erase an order from its FIFO and the index, returning the record
    ///
    /// The price level is erased when it becomes empty. Unknown ids are a
    /// no-op: late cancels after a fill are expected in practice.
    pub fn remove(&mut self, id: OrderId) -> Option<Box<Order>> {
        let handle = self.index.remove(&id)?;
        let (side, price) = {
            let node = &self.arena[handle];
            (node.order.side(), node.order.price())
        };

        let levels = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        if let Some(level) = levels.get_mut(&price) {
            level.unlink(&mut self.arena, handle);
            if level.is_empty() {
                levels.remove(&price);
            }
        }

        Some(self.arena.remove(handle).order)
    }

    /// Cancel a resting order and erase it, returning the record
    ///
    /// Unknown ids are a no-op. Propagates `IllegalTransition` if the
    /// record is already filled, which is unreachable through the engine:
    /// filled orders are removed the moment they fill.
    pub fn cancel(&mut self, id: OrderId) -> Result<Option<Box<Order>>, BookError> {
        let Some(&handle) = self.index.get(&id) else {
            return Ok(None);
        };
        self.arena[handle].order.cancel().map_err(BookError::from)?;
        Ok(self.remove(id))
    }

    /// Best bid price, if any
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// Best ask price, if any
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Best bid level with its price
    pub fn best_bid_level(&self) -> Option<(Price, &PriceLevel)> {
        self.bids
            .iter()
            .next_back()
            .map(|(price, level)| (*price, level))
    }

    /// Best ask level with its price
    pub fn best_ask_level(&self) -> Option<(Price, &PriceLevel)> {
        self.asks.iter().next().map(|(price, level)| (*price, level))
    }

    /// Bid levels in priority order (highest price first)
    pub fn bids(&self) -> Levels<'_> {
        Levels {
            inner: LevelsInner::Desc(self.bids.iter().rev()),
        }
    }

    /// Ask levels in priority order (lowest price first)
    pub fn asks(&self) -> Levels<'_> {
        Levels {
            inner: LevelsInner::Asc(self.asks.iter()),
        }
    }

    /// Levels of one side in its priority order
    pub(crate) fn side_levels(&self, side: Side) -> Levels<'_> {
        match side {
            Side::Buy => self.bids(),
            Side::Sell => self.asks(),
        }
    }

    /// Orders at a level in FIFO order
    pub fn orders_at<'a>(&'a self, level: &'a PriceLevel) -> impl Iterator<Item = &'a Order> {
        level.handles(&self.arena).map(move |h| &*self.arena[h].order)
    }

    /// Resting order by id
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.index.get(&id).map(|&h| &*self.arena[h].order)
    }

    /// Check whether an id is resting in the book
    pub fn contains(&self, id: OrderId) -> bool {
        self.index.contains_key(&id)
    }

    /// Total number of resting orders
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of bid price levels
    pub fn bid_depth(&self) -> usize {
        self.bids.len()
    }

    /// Number of ask price levels
    pub fn ask_depth(&self) -> usize {
        self.asks.len()
    }

    /// Front (oldest) order of the best level on `side`
    pub(crate) fn front_of_best(&self, side: Side) -> Option<NodeHandle> {
        match side {
            Side::Buy => self.bids.values().next_back()?.front(),
            Side::Sell => self.asks.values().next()?.front(),
        }
    }

    /// Handles at a level in FIFO order
    pub(crate) fn handles_at<'a>(
        &'a self,
        level: &'a PriceLevel,
    ) -> impl Iterator<Item = NodeHandle> + 'a {
        level.handles(&self.arena)
    }

    /// Order behind an arena handle
    pub(crate) fn order(&self, handle: NodeHandle) -> &Order {
        &self.arena[handle].order
    }

    /// Fill a resting order in place, keeping its level total consistent
    pub(crate) fn fill_node(
        &mut self,
        handle: NodeHandle,
        quantity: Quantity,
    ) -> Result<(), BookError> {
        let node = &mut self.arena[handle];
        let id = node.order.order_id();
        let side = node.order.side();
        let price = node.order.price();
        node.order.fill(quantity)?;

        let levels = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        match levels.get_mut(&price) {
            Some(level) => {
                level.reduce(quantity);
                Ok(())
            }
            None => Err(BookError::InconsistentIndex { id }),
        }
    }
}

/// Iterator over one side's levels in priority order
pub struct Levels<'a> {
    inner: LevelsInner<'a>,
}

enum LevelsInner<'a> {
    Asc(btree_map::Iter<'a, Price, PriceLevel>),
    Desc(Rev<btree_map::Iter<'a, Price, PriceLevel>>),
}

impl<'a> Iterator for Levels<'a> {
    type Item = (Price, &'a PriceLevel);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            LevelsInner::Asc(iter) => iter.next().map(|(p, l)| (*p, l)),
            LevelsInner::Desc(iter) => iter.next().map(|(p, l)| (*p, l)),
        }
    }
}
