//! Trade sink and in-memory history
//!
//! The engine emits every trade to a sink as matching proceeds. The sink
//! contract is append-only and infallible; what happens downstream
//! (persistence, dissemination) is not the engine's concern. The vec-backed
//! history here is the in-process consumer used by tests and benchmarks.

use types::trade::Trade;

/// Append-only consumer of trade records
pub trait TradeSink {
    /// Record one trade; called during matching, must not fail
    fn record_trade(&mut self, trade: Trade);
}

/// In-memory trade history
#[derive(Debug, Default)]
pub struct TradeHistory {
    trades: Vec<Trade>,
}

impl TradeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// All trades in emission order
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

impl TradeSink for TradeHistory {
    fn record_trade(&mut self, trade: Trade) {
        self.trades.push(trade);
    }
}
