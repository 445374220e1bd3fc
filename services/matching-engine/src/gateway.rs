//! Order admission gateway
//!
//! Stateless validation in front of the engine. Rejections happen before
//! any matching; once the engine has run, the only post-hoc mapping is
//! immediate-or-cancel / fill-or-kill orders that ended cancelled, which
//! are reported as insufficient liquidity. Trades that did occur during a
//! partial immediate-or-cancel fill are not rolled back; the rejection
//! tells the submitter the order was not fully filled.

use tracing::warn;
use types::ids::OrderId;
use types::order::{OrderRequest, OrderStatus, OrderType, TimeInForce};

use crate::events::{OrderResult, RejectReason};
use crate::history::TradeSink;
use crate::MatchingEngine;

/// Synchronous admission layer wrapping the engine
pub struct OrderGateway<S: TradeSink> {
    engine: MatchingEngine<S>,
}

impl<S: TradeSink> OrderGateway<S> {
    pub fn new(engine: MatchingEngine<S>) -> Self {
        Self { engine }
    }

    /// The wrapped engine
    pub fn engine(&self) -> &MatchingEngine<S> {
        &self.engine
    }

    /// Validate and submit an order
    ///
    /// Market orders skip the price check: they carry an ignored price
    /// field, and a zero sentinel is the conventional way to submit one.
    pub fn submit(&mut self, request: &OrderRequest) -> OrderResult {
        if request.order_type != OrderType::Market && request.price.is_zero() {
            return OrderResult::rejected(request.order_id, RejectReason::InvalidPrice);
        }
        if request.quantity.is_zero() {
            return OrderResult::rejected(request.order_id, RejectReason::InvalidQuantity);
        }
        if request.order_type == OrderType::Market
            && request.time_in_force == TimeInForce::GoodTillCancel
        {
            return OrderResult::rejected(request.order_id, RejectReason::InvalidTif);
        }

        let report = match self.engine.on_new_order(request) {
            Ok(report) => report,
            Err(error) => {
                warn!(order = %request.order_id, %error, "engine rejected order");
                return OrderResult::rejected(request.order_id, RejectReason::Other);
            }
        };

        if matches!(
            request.time_in_force,
            TimeInForce::ImmediateOrCancel | TimeInForce::FillOrKill
        ) && report.status == OrderStatus::Cancelled
        {
            return OrderResult::rejected(request.order_id, RejectReason::InsufficientLiquidity);
        }

        OrderResult::accepted(request.order_id)
    }

    /// Cancel a resting order
    ///
    /// Unknown ids are accepted: the order may simply have filled already.
    pub fn cancel(&mut self, order_id: OrderId) -> OrderResult {
        match self.engine.on_cancel_order(order_id) {
            Ok(()) => OrderResult::accepted(order_id),
            Err(error) => {
                warn!(order = %order_id, %error, "engine rejected cancel");
                OrderResult::rejected(order_id, RejectReason::Other)
            }
        }
    }
}
