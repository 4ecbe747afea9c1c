//! Console rendering sink.

use crate::sink::{SinkError, SinkEvent, TradeSink};
use colored::Colorize;
use pumpline_core::TradeEvent;

/// Prints each trade as a single colored line.
///
/// Buys are green, sells are red. Counter updates and token announcements
/// are not rendered; the running totals belong to the WebSocket clients.
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    fn format_line(event: &TradeEvent) -> String {
        let side = event.side.to_string();
        let side = if event.side.is_buy() {
            side.green().bold()
        } else {
            side.red().bold()
        };
        format!(
            "{} wallet ...{} {} for {:.2} SOL",
            if event.side.is_buy() { "🟢" } else { "🔴" },
            event.trader_suffix(),
            side,
            event.sol_amount,
        )
    }
}

impl TradeSink for ConsoleSink {
    fn deliver(&self, event: &SinkEvent) -> Result<(), SinkError> {
        if let SinkEvent::Transaction(trade) = event {
            println!("{}", Self::format_line(trade));
        }
        Ok(())
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpline_core::TradeSide;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_buy_line() {
        colored::control::set_override(false);
        let event = TradeEvent::new(
            TradeSide::Buy,
            "So1111111111111111111111111111111111111abcd".to_string(),
            dec!(1.5),
        );
        assert_eq!(
            ConsoleSink::format_line(&event),
            "🟢 wallet ...abcd BUY for 1.50 SOL"
        );
    }

    #[test]
    fn test_format_sell_line() {
        colored::control::set_override(false);
        let event = TradeEvent::new(TradeSide::Sell, "WALLETzzzz".to_string(), dec!(0.25));
        assert_eq!(
            ConsoleSink::format_line(&event),
            "🔴 wallet ...zzzz SELL for 0.25 SOL"
        );
    }

    #[test]
    fn test_non_transaction_events_are_ignored() {
        let sink = ConsoleSink::new();
        assert!(sink
            .deliver(&SinkEvent::TokenSubscription("MINT".to_string()))
            .is_ok());
    }
}
