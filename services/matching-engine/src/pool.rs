//! Order record pool
//!
//! A bounded free list recycling order records so the hot path does not
//! allocate per request. Release pushes the record as-is; every field is
//! overwritten on the next allocate. When the free list grows past the
//! high-water mark it is cut back to the low-water mark and the excess
//! records are dropped.
//!
//! Not thread-safe: the engine is the sole runtime caller.

use types::order::{Order, OrderRequest};

/// Free-list size that triggers a trim
pub const HIGH_WATER_MARK: usize = 500;
/// Free-list size after a trim
pub const LOW_WATER_MARK: usize = 250;

/// Recycler for order records
#[derive(Debug)]
pub struct OrderPool {
    free: Vec<Box<Order>>,
    high_water: usize,
    low_water: usize,
}

impl OrderPool {
    /// Create an empty pool with the default watermarks
    pub fn new() -> Self {
        Self::with_watermarks(HIGH_WATER_MARK, LOW_WATER_MARK)
    }

    /// Create an empty pool with reserved free-list capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let mut pool = Self::new();
        pool.free.reserve(capacity);
        pool
    }

    /// Create a pool with custom watermarks
    pub fn with_watermarks(high_water: usize, low_water: usize) -> Self {
        assert!(low_water <= high_water, "low-water mark above high-water mark");
        Self {
            free: Vec::new(),
            high_water,
            low_water,
        }
    }

    /// Take a record initialised from `request` with status `New`
    ///
    /// Reuses a free record when one is available, otherwise boxes a fresh
    /// one.
    pub fn allocate(&mut self, request: &OrderRequest) -> Box<Order> {
        match self.free.pop() {
            Some(mut order) => {
                order.reset(request);
                order
            }
            None => Box::new(Order::from_request(request)),
        }
    }

    /// Return a record to the free list, trimming past the high-water mark
    pub fn release(&mut self, order: Box<Order>) {
        self.free.push(order);
        if self.free.len() > self.high_water {
            self.free.truncate(self.low_water);
        }
    }

    /// Number of records currently on the free list
    pub fn free_len(&self) -> usize {
        self.free.len()
    }
}

impl Default for OrderPool {
    fn default() -> Self {
        Self::new()
    }
}
