//! Matching engine core
//!
//! The single-writer state machine that consumes incoming orders, walks
//! the opposite side of the book in price-time priority, emits trades to
//! the sink, and either rests or cancels residual quantity according to
//! the order's time-in-force. Calls run to completion on the caller's
//! thread: no locks, no I/O, no suspension points, allocation amortised
//! through the record pool.

use tracing::debug;
use types::errors::EngineError;
use types::ids::OrderId;
use types::order::{Order, OrderRequest, OrderStatus, OrderType, Side, TimeInForce};

use crate::book::{NodeHandle, OrderBook};
use crate::events::ExecutionReport;
use crate::history::TradeSink;
use crate::matching::{crossing, executor, fok};
use crate::pool::OrderPool;

/// Price-time priority matching engine for a single instrument
///
/// Owns the resting book, the record pool, and the trade sink. Input order
/// is the sole source of time priority; requests are processed in the
/// sequence presented by the caller.
pub struct MatchingEngine<S: TradeSink> {
    book: OrderBook,
    pool: OrderPool,
    sink: S,
}

impl<S: TradeSink> MatchingEngine<S> {
    /// Create an engine emitting trades into `sink`
    pub fn new(sink: S) -> Self {
        Self::with_pool(sink, OrderPool::new())
    }

    /// Create an engine with a pre-sized record pool
    pub fn with_pool(sink: S, pool: OrderPool) -> Self {
        Self {
            book: OrderBook::new(),
            pool,
            sink,
        }
    }

    /// The resting book
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// The trade sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Process an incoming order
    ///
    /// Matches per the order's type and time-in-force, rests eligible
    /// residual, cancels immediate-or-cancel / fill-or-kill residual, and
    /// releases terminal records back to the pool. Trades are observed via
    /// the sink; the returned report snapshots the order's state at exit.
    pub fn on_new_order(&mut self, request: &OrderRequest) -> Result<ExecutionReport, EngineError> {
        let mut order = self.pool.allocate(request);
        self.match_order(&mut order)?;

        if order.status() != OrderStatus::Filled {
            if order.order_type() == OrderType::Limit
                && order.time_in_force() == TimeInForce::GoodTillCancel
            {
                let report = Self::report(&order);
                self.book.add(order)?;
                return Ok(report);
            }

            if matches!(
                order.time_in_force(),
                TimeInForce::ImmediateOrCancel | TimeInForce::FillOrKill
            ) {
                order.cancel()?;
            }
        }

        let report = Self::report(&order);
        self.pool.release(order);
        Ok(report)
    }

    /// Cancel a resting order
    ///
    /// Unknown ids are a silent no-op: late cancels racing a fill are
    /// expected in practice.
    pub fn on_cancel_order(&mut self, order_id: OrderId) -> Result<(), EngineError> {
        match self.book.cancel(order_id)? {
            Some(record) => self.pool.release(record),
            None => debug!(order = %order_id, "cancel request for unknown order"),
        }
        Ok(())
    }

    fn match_order(&mut self, incoming: &mut Order) -> Result<(), EngineError> {
        match incoming.time_in_force() {
            TimeInForce::GoodTillCancel | TimeInForce::ImmediateOrCancel => {
                self.walk_book(incoming)
            }
            TimeInForce::FillOrKill => self.fill_or_kill(incoming),
        }
    }

    /// Whether the incoming order crosses the opposite side right now
    fn can_match(&self, incoming: &Order) -> bool {
        let best = match incoming.side().opposite() {
            Side::Buy => self.book.best_bid(),
            Side::Sell => self.book.best_ask(),
        };
        match incoming.order_type() {
            OrderType::Market => best.is_some(),
            OrderType::Limit => best
                .map(|price| crossing::crosses(incoming.side(), incoming.price(), price))
                .unwrap_or(false),
        }
    }

    /// Walk the opposite side while the price crosses, filling in
    /// price-time priority
    fn walk_book(&mut self, incoming: &mut Order) -> Result<(), EngineError> {
        while !incoming.remaining_quantity().is_zero() && self.can_match(incoming) {
            let Some(handle) = self.book.front_of_best(incoming.side().opposite()) else {
                break;
            };
            self.execute_fill(incoming, handle)?;
        }
        Ok(())
    }

    /// Two-phase fill-or-kill: dry-run scan, then commit the trial set
    fn fill_or_kill(&mut self, incoming: &mut Order) -> Result<(), EngineError> {
        let Some(plan) = fok::plan_full_fill(&self.book, incoming) else {
            // Unreachable quantity: zero fills, caller cancels the order
            return Ok(());
        };
        for handle in plan {
            self.execute_fill(incoming, handle)?;
        }
        Ok(())
    }

    /// Fill the incoming order against one resting order, emit the trade,
    /// and erase the resting order if it filled completely
    fn execute_fill(&mut self, incoming: &mut Order, handle: NodeHandle) -> Result<(), EngineError> {
        let (quantity, trade) = {
            let resting = self.book.order(handle);
            executor::guard_fill(incoming, resting)?;
            let quantity = incoming
                .remaining_quantity()
                .min(resting.remaining_quantity());
            let trade = executor::trade_between(incoming, resting, resting.price(), quantity);
            (quantity, trade)
        };

        incoming.fill(quantity)?;
        self.book.fill_node(handle, quantity)?;
        self.sink.record_trade(trade);

        let resting = self.book.order(handle);
        if resting.status() == OrderStatus::Filled {
            let id = resting.order_id();
            if let Some(record) = self.book.remove(id) {
                self.pool.release(record);
            }
        }
        Ok(())
    }

    fn report(order: &Order) -> ExecutionReport {
        ExecutionReport {
            order_id: order.order_id(),
            status: order.status(),
            filled_quantity: order.filled_quantity(),
            remaining_quantity: order.remaining_quantity(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::history::TradeHistory;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use types::numeric::{Price, Quantity};

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Limit {
            side: Side,
            tif: TimeInForce,
            price: u32,
            qty: u32,
        },
        Market {
            side: Side,
            tif: TimeInForce,
            qty: u32,
        },
        Cancel {
            target: u64,
        },
    }

    fn side_strategy() -> impl Strategy<Value = Side> {
        prop_oneof![Just(Side::Buy), Just(Side::Sell)]
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let any_tif = prop_oneof![
            Just(TimeInForce::GoodTillCancel),
            Just(TimeInForce::ImmediateOrCancel),
            Just(TimeInForce::FillOrKill),
        ];
        let immediate_tif = prop_oneof![
            Just(TimeInForce::ImmediateOrCancel),
            Just(TimeInForce::FillOrKill),
        ];
        prop_oneof![
            5 => (side_strategy(), any_tif, 95u32..=105, 1u32..=50).prop_map(
                |(side, tif, price, qty)| Op::Limit { side, tif, price, qty }
            ),
            1 => (side_strategy(), immediate_tif, 1u32..=60)
                .prop_map(|(side, tif, qty)| Op::Market { side, tif, qty }),
            1 => (1u64..=80).prop_map(|target| Op::Cancel { target }),
        ]
    }

    proptest! {
        #[test]
        fn prop_engine_invariants(ops in proptest::collection::vec(op_strategy(), 1..80)) {
            let mut engine = MatchingEngine::new(TradeHistory::new());
            let mut submitted: Vec<(OrderId, Quantity)> = Vec::new();

            for (i, op) in ops.iter().enumerate() {
                let id = OrderId::new(i as u64 + 1);
                match *op {
                    Op::Limit { side, tif, price, qty } => {
                        let req = OrderRequest::limit(
                            id, side, tif, Price::new(price), Quantity::new(qty),
                        );
                        let before = engine.sink().len();
                        let report = engine.on_new_order(&req).unwrap();
                        submitted.push((id, Quantity::new(qty)));

                        prop_assert_eq!(
                            report.filled_quantity + report.remaining_quantity,
                            Quantity::new(qty)
                        );
                        if tif != TimeInForce::GoodTillCancel {
                            prop_assert!(!engine.book().contains(id));
                        }
                        if tif == TimeInForce::FillOrKill {
                            // All-or-nothing: full fill or zero fills
                            let emitted = engine.sink().len() - before;
                            if report.status == OrderStatus::Filled {
                                prop_assert_eq!(report.filled_quantity, Quantity::new(qty));
                            } else {
                                prop_assert_eq!(report.status, OrderStatus::Cancelled);
                                prop_assert_eq!(report.filled_quantity, Quantity::ZERO);
                                prop_assert_eq!(emitted, 0);
                            }
                        }
                    }
                    Op::Market { side, tif, qty } => {
                        let req = OrderRequest::market(id, side, tif, Quantity::new(qty));
                        let report = engine.on_new_order(&req).unwrap();
                        submitted.push((id, Quantity::new(qty)));

                        prop_assert!(report.status.is_terminal());
                        prop_assert!(!engine.book().contains(id));
                    }
                    Op::Cancel { target } => {
                        engine.on_cancel_order(OrderId::new(target)).unwrap();
                    }
                }

                // The book is never crossed
                if let (Some(bid), Some(ask)) =
                    (engine.book().best_bid(), engine.book().best_ask())
                {
                    prop_assert!(bid < ask);
                }
                // Priority iteration is sorted and levels are never empty
                let bid_prices: Vec<Price> = engine.book().bids().map(|(p, _)| p).collect();
                prop_assert!(bid_prices.windows(2).all(|w| w[0] > w[1]));
                let ask_prices: Vec<Price> = engine.book().asks().map(|(p, _)| p).collect();
                prop_assert!(ask_prices.windows(2).all(|w| w[0] < w[1]));
                for (_, level) in engine.book().bids().chain(engine.book().asks()) {
                    prop_assert!(!level.is_empty());
                    prop_assert!(!level.total_quantity().is_zero());
                }
            }

            // Conservation: per-order fills recorded in the history match the
            // state of every order still resting
            let mut filled: HashMap<OrderId, Quantity> = HashMap::new();
            for trade in engine.sink().trades() {
                *filled.entry(trade.buy_order_id).or_default() += trade.quantity;
                *filled.entry(trade.sell_order_id).or_default() += trade.quantity;
                // Trade price is the resting side's price; a limit
                // participant never trades through its own limit
                if trade.buy_order_type == OrderType::Limit {
                    prop_assert!(trade.price <= trade.buy_price);
                }
                if trade.sell_order_type == OrderType::Limit {
                    prop_assert!(trade.price >= trade.sell_price);
                }
            }
            for (id, initial) in submitted {
                let fills = filled.get(&id).copied().unwrap_or(Quantity::ZERO);
                prop_assert!(fills <= initial);
                if let Some(order) = engine.book().get(id) {
                    prop_assert_eq!(order.filled_quantity(), fills);
                    prop_assert_eq!(order.remaining_quantity(), initial - fills);
                    prop_assert!(matches!(
                        order.status(),
                        OrderStatus::New | OrderStatus::Partial
                    ));
                }
            }
        }
    }
}
