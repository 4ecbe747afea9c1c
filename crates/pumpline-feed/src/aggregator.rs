//! Running buy/sell totals for the active token.

use pumpline_core::{AggregateState, TradeEvent, TradeSide};

/// Folds accepted trade events into cumulative bought/sold totals.
///
/// Totals only ever grow; there is no undo. The net position is derived on
/// read and is the only value that can move in both directions. Directions
/// other than buy/sell pass through without touching the totals.
#[derive(Debug, Default)]
pub struct Aggregator {
    state: AggregateState,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one trade and return the state as of after it.
    pub fn apply(&mut self, event: &TradeEvent) -> AggregateState {
        match event.side {
            TradeSide::Buy => self.state.total_bought += event.sol_amount,
            TradeSide::Sell => self.state.total_sold += event.sol_amount,
            TradeSide::Other(_) => {}
        }
        self.state.clone()
    }

    pub fn state(&self) -> &AggregateState {
        &self.state
    }
}
