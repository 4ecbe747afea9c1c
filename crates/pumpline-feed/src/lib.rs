//! Trade-event parsing and aggregation.
//!
//! Turns raw feed messages into validated `TradeEvent`s and folds them into
//! the running bought/sold totals. Both pieces are owned by the single
//! pipeline task; neither needs a lock.

pub mod aggregator;
pub mod parser;

pub use aggregator::Aggregator;
pub use parser::{ParserStats, TradeEventParser};
