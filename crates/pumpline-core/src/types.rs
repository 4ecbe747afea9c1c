//! Trade event and aggregate state types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a trade as reported by the upstream feed.
///
/// The feed labels every message with a `txType`, and not all of them are
/// trades: `create` and friends come down the same pipe. The literal is
/// kept so rendering can show it; only `Buy` and `Sell` ever count toward
/// totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
    /// Any other direction literal, uppercased. Rendered sell-style,
    /// never counted.
    Other(String),
}

impl TradeSide {
    /// Normalize a raw direction literal (case-insensitive).
    pub fn normalize(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("buy") {
            Self::Buy
        } else if raw.eq_ignore_ascii_case("sell") {
            Self::Sell
        } else {
            Self::Other(raw.to_ascii_uppercase())
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Self::Buy)
    }

    /// Whether this direction moves the bought/sold totals.
    pub fn is_trade(&self) -> bool {
        matches!(self, Self::Buy | Self::Sell)
    }
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Other(literal) => write!(f, "{literal}"),
        }
    }
}

/// One normalized occurrence derived from a raw feed message.
///
/// Immutable once constructed. The full trader key is kept so that display
/// truncation is a presentation concern, not a data-model one.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeEvent {
    /// Normalized direction.
    pub side: TradeSide,
    /// Opaque trader identifier (full public key from the feed).
    pub trader: String,
    /// Trade size in SOL.
    pub sol_amount: Decimal,
    /// When this process observed the event.
    pub observed_at: DateTime<Utc>,
}

impl TradeEvent {
    pub fn new(side: TradeSide, trader: impl Into<String>, sol_amount: Decimal) -> Self {
        Self {
            side,
            trader: trader.into(),
            sol_amount,
            observed_at: Utc::now(),
        }
    }

    /// Last four characters of the trader key, the only part ever displayed.
    ///
    /// Counted in chars, not bytes: the feed is not trusted to send ASCII.
    pub fn trader_suffix(&self) -> &str {
        match self.trader.char_indices().rev().nth(3) {
            Some((idx, _)) => &self.trader[idx..],
            None => &self.trader,
        }
    }
}

/// Cumulative bought/sold totals for the active token.
///
/// `net_amount` is always derived, never stored: the two totals only ever
/// grow, while the net may go negative when sells outpace buys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateState {
    pub total_bought: Decimal,
    pub total_sold: Decimal,
}

impl AggregateState {
    /// Net position, recomputed on every read.
    pub fn net_amount(&self) -> Decimal {
        self.total_bought - self.total_sold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_normalize() {
        assert_eq!(TradeSide::normalize("buy"), TradeSide::Buy);
        assert_eq!(TradeSide::normalize("BUY"), TradeSide::Buy);
        assert_eq!(TradeSide::normalize("Buy"), TradeSide::Buy);
        assert_eq!(TradeSide::normalize("sell"), TradeSide::Sell);
        assert_eq!(
            TradeSide::normalize("create"),
            TradeSide::Other("CREATE".to_string())
        );
    }

    #[test]
    fn test_only_buy_and_sell_are_trades() {
        assert!(TradeSide::Buy.is_trade());
        assert!(TradeSide::Sell.is_trade());
        assert!(!TradeSide::Other("CREATE".to_string()).is_trade());
    }

    #[test]
    fn test_side_display() {
        assert_eq!(TradeSide::Buy.to_string(), "BUY");
        assert_eq!(TradeSide::Sell.to_string(), "SELL");
        assert_eq!(TradeSide::Other("CREATE".to_string()).to_string(), "CREATE");
    }

    #[test]
    fn test_trader_suffix() {
        let event = TradeEvent::new(TradeSide::Buy, "WALLETabcd1234", dec!(1.5));
        assert_eq!(event.trader_suffix(), "1234");
    }

    #[test]
    fn test_trader_suffix_short_key() {
        let event = TradeEvent::new(TradeSide::Sell, "abc", dec!(1));
        assert_eq!(event.trader_suffix(), "abc");
    }

    #[test]
    fn test_trader_suffix_multibyte_key() {
        // Anomalous ids must not panic on a non-ASCII byte boundary.
        let event = TradeEvent::new(TradeSide::Buy, "€€", dec!(1));
        assert_eq!(event.trader_suffix(), "€€");

        let event = TradeEvent::new(TradeSide::Buy, "abc€€def", dec!(1));
        assert_eq!(event.trader_suffix(), "€def");
    }

    #[test]
    fn test_net_amount_derived() {
        let state = AggregateState {
            total_bought: dec!(1.5),
            total_sold: dec!(2),
        };
        assert_eq!(state.net_amount(), dec!(-0.5));
    }

    #[test]
    fn test_default_state_is_zero() {
        let state = AggregateState::default();
        assert_eq!(state.total_bought, Decimal::ZERO);
        assert_eq!(state.total_sold, Decimal::ZERO);
        assert_eq!(state.net_amount(), Decimal::ZERO);
    }
}
