//! Core domain types for the pumpline trade relay.
//!
//! Everything downstream of the upstream feed speaks in these types:
//! a normalized `TradeEvent` per raw feed message and a running
//! `AggregateState` of bought/sold totals.

pub mod types;

pub use types::{AggregateState, TradeEvent, TradeSide};
