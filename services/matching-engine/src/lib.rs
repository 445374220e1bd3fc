//! Matching Engine
//!
//! Single-instrument, in-process limit order book implementing a
//! continuous two-sided auction with price-time priority. Incoming orders
//! match against the resting book, emit trades, and rest or cancel
//! residual quantity according to their time-in-force (good-till-cancel,
//! immediate-or-cancel, fill-or-kill; market orders for the immediate
//! regimes).
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced; ties broken by arrival order
//! - Trades execute at the resting order's price
//! - The book is never crossed after a call returns
//! - Immediate-or-cancel and fill-or-kill orders never rest
//! - Fill-or-kill is all-or-nothing: a full fill or zero trades
//!
//! The core is single-threaded and non-suspending: calls execute to
//! completion on the caller's thread with no locks and no I/O, and record
//! allocation is amortised through a bounded pool.

pub mod book;
pub mod engine;
pub mod events;
pub mod gateway;
pub mod history;
pub mod matching;
pub mod pool;

pub use book::{OrderBook, PriceLevel};
pub use engine::MatchingEngine;
pub use events::{ExecutionReport, OrderResult, RejectReason};
pub use gateway::OrderGateway;
pub use history::{TradeHistory, TradeSink};
pub use pool::OrderPool;
