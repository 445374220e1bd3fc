//! Error types for the matching engine
//!
//! Internal logic errors only: every variant here indicates a violated
//! invariant in otherwise well-formed input and aborts the operation that
//! detected it. User-visible rejections are not errors; they travel as
//! `RejectReason` values in the gateway's result type.

use crate::ids::OrderId;
use crate::numeric::Quantity;
use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Book error: {0}")]
    Book(#[from] BookError),

    #[error("Match error: {0}")]
    Match(#[from] MatchError),
}

/// Order lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Cannot fill order {id}: fill quantity {fill} exceeds remaining quantity {remaining}")]
    IllegalFill {
        id: OrderId,
        fill: Quantity,
        remaining: Quantity,
    },

    #[error("Cannot cancel order {id}: it has already been filled")]
    IllegalTransition { id: OrderId },
}

/// Order book errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Order {id} is already indexed in the book")]
    DuplicateOrder { id: OrderId },

    #[error("Order {id} is terminal and cannot rest in the book")]
    Terminal { id: OrderId },

    #[error("Book index for order {id} points at a vacant or mislinked node")]
    InconsistentIndex { id: OrderId },

    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}

/// Matching errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Cannot trade incoming order {incoming} against resting order {resting}: same side")]
    SameSide { incoming: OrderId, resting: OrderId },

    #[error("Cannot trade against resting order {resting}: it is cancelled")]
    RestingCancelled { resting: OrderId },

    #[error("Cannot trade incoming order {incoming}: it is cancelled")]
    IncomingCancelled { incoming: OrderId },

    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}
