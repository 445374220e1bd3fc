//! Price level with an intrusive FIFO queue
//!
//! A price level holds every resting order at one price on one side, in
//! arrival order. The queue is a doubly-linked list threaded through the
//! book's node arena: each node stores its neighbours' handles, so removal
//! from the middle of a level is O(1) once the handle is known. A level
//! also caches its total resting quantity for depth queries and the
//! fill-or-kill pre-scan.

use slab::Slab;
use types::numeric::Quantity;
use types::order::Order;

/// Handle into the book's node arena
pub(crate) type NodeHandle = usize;

/// Arena slot: the pooled order record plus its intra-level links
#[derive(Debug)]
pub(crate) struct OrderNode {
    pub(crate) order: Box<Order>,
    pub(crate) prev: Option<NodeHandle>,
    pub(crate) next: Option<NodeHandle>,
}

impl OrderNode {
    pub(crate) fn new(order: Box<Order>) -> Self {
        Self {
            order,
            prev: None,
            next: None,
        }
    }
}

/// All resting orders at one price, in time priority
#[derive(Debug, Default)]
pub struct PriceLevel {
    head: Option<NodeHandle>,
    tail: Option<NodeHandle>,
    total_quantity: Quantity,
    len: usize,
}

impl PriceLevel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a node at the tail of the queue (time priority)
    pub(crate) fn push_back(&mut self, arena: &mut Slab<OrderNode>, handle: NodeHandle) {
        let remaining = arena[handle].order.remaining_quantity();

        arena[handle].prev = self.tail;
        arena[handle].next = None;
        if let Some(tail) = self.tail {
            arena[tail].next = Some(handle);
        } else {
            self.head = Some(handle);
        }
        self.tail = Some(handle);

        self.total_quantity += remaining;
        self.len += 1;
    }

    /// Detach a node from anywhere in the queue
    ///
    /// The caller guarantees the node belongs to this level.
    pub(crate) fn unlink(&mut self, arena: &mut Slab<OrderNode>, handle: NodeHandle) {
        let (prev, next, remaining) = {
            let node = &arena[handle];
            (node.prev, node.next, node.order.remaining_quantity())
        };

        match prev {
            Some(p) => arena[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => arena[n].prev = prev,
            None => self.tail = prev,
        }
        arena[handle].prev = None;
        arena[handle].next = None;

        self.total_quantity -= remaining;
        self.len -= 1;
    }

    /// Reduce the cached total after a fill against one of this level's orders
    pub(crate) fn reduce(&mut self, quantity: Quantity) {
        self.total_quantity -= quantity;
    }

    /// Handle of the order at the front of the queue (oldest)
    pub(crate) fn front(&self) -> Option<NodeHandle> {
        self.head
    }

    /// Iterate handles in FIFO order
    pub(crate) fn handles<'a>(&self, arena: &'a Slab<OrderNode>) -> LevelHandles<'a> {
        LevelHandles {
            arena,
            cur: self.head,
        }
    }

    /// Total resting quantity at this level
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Number of resting orders at this level
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// FIFO iterator over a level's node handles
pub(crate) struct LevelHandles<'a> {
    arena: &'a Slab<OrderNode>,
    cur: Option<NodeHandle>,
}

impl<'a> Iterator for LevelHandles<'a> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cur?;
        self.cur = self.arena[handle].next;
        Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::OrderId;
    use types::numeric::Price;
    use types::order::{OrderType, Side, TimeInForce};

    fn insert(arena: &mut Slab<OrderNode>, level: &mut PriceLevel, id: u64, qty: u32) -> NodeHandle {
        let order = Box::new(Order::new(
            OrderId::new(id),
            OrderType::Limit,
            Side::Buy,
            TimeInForce::GoodTillCancel,
            Price::new(100),
            Quantity::new(qty),
        ));
        let handle = arena.insert(OrderNode::new(order));
        level.push_back(arena, handle);
        handle
    }

    fn ids_in_order(arena: &Slab<OrderNode>, level: &PriceLevel) -> Vec<u64> {
        level
            .handles(arena)
            .map(|h| arena[h].order.order_id().value())
            .collect()
    }

    #[test]
    fn test_push_back_keeps_fifo_order() {
        let mut arena = Slab::new();
        let mut level = PriceLevel::new();

        insert(&mut arena, &mut level, 1, 10);
        insert(&mut arena, &mut level, 2, 20);
        insert(&mut arena, &mut level, 3, 30);

        assert_eq!(ids_in_order(&arena, &level), vec![1, 2, 3]);
        assert_eq!(level.len(), 3);
        assert_eq!(level.total_quantity(), Quantity::new(60));
        assert_eq!(
            arena[level.front().unwrap()].order.order_id(),
            OrderId::new(1)
        );
    }

    #[test]
    fn test_unlink_middle() {
        let mut arena = Slab::new();
        let mut level = PriceLevel::new();

        insert(&mut arena, &mut level, 1, 10);
        let middle = insert(&mut arena, &mut level, 2, 20);
        insert(&mut arena, &mut level, 3, 30);

        level.unlink(&mut arena, middle);

        assert_eq!(ids_in_order(&arena, &level), vec![1, 3]);
        assert_eq!(level.len(), 2);
        assert_eq!(level.total_quantity(), Quantity::new(40));
    }

    #[test]
    fn test_unlink_head_and_tail() {
        let mut arena = Slab::new();
        let mut level = PriceLevel::new();

        let head = insert(&mut arena, &mut level, 1, 10);
        insert(&mut arena, &mut level, 2, 20);
        let tail = insert(&mut arena, &mut level, 3, 30);

        level.unlink(&mut arena, head);
        assert_eq!(ids_in_order(&arena, &level), vec![2, 3]);

        level.unlink(&mut arena, tail);
        assert_eq!(ids_in_order(&arena, &level), vec![2]);
        assert_eq!(level.total_quantity(), Quantity::new(20));
    }

    #[test]
    fn test_unlink_last_empties_level() {
        let mut arena = Slab::new();
        let mut level = PriceLevel::new();

        let only = insert(&mut arena, &mut level, 1, 10);
        level.unlink(&mut arena, only);

        assert!(level.is_empty());
        assert_eq!(level.front(), None);
        assert_eq!(level.total_quantity(), Quantity::ZERO);
    }

    #[test]
    fn test_reduce_tracks_fills() {
        let mut arena = Slab::new();
        let mut level = PriceLevel::new();

        insert(&mut arena, &mut level, 1, 50);
        level.reduce(Quantity::new(20));
        assert_eq!(level.total_quantity(), Quantity::new(30));
    }
}
