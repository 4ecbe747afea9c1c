//! Client-facing message types.
//!
//! These are the JSON shapes sent to WebSocket clients and returned from the
//! REST snapshot endpoint.

use chrono::{DateTime, Utc};
use pumpline_core::{AggregateState, TradeEvent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A message pushed to a connected client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    Transaction(TransactionPayload),
    CounterUpdate(CounterPayload),
    TokenSubscription(String),
}

/// One transaction, as shown to clients.
///
/// `tx_type` is the uppercased direction literal; `trader_public_key`
/// carries only the last four characters of the wallet, clients never see
/// the full key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub tx_type: String,
    pub trader_public_key: String,
    pub sol_amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl From<&TradeEvent> for TransactionPayload {
    fn from(event: &TradeEvent) -> Self {
        Self {
            tx_type: event.side.to_string(),
            trader_public_key: event.trader_suffix().to_string(),
            sol_amount: event.sol_amount,
            timestamp: event.observed_at,
        }
    }
}

/// Cumulative totals for the active token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterPayload {
    pub total_bought: Decimal,
    pub total_sold: Decimal,
    pub net_amount: Decimal,
}

impl From<&AggregateState> for CounterPayload {
    fn from(state: &AggregateState) -> Self {
        Self {
            total_bought: state.total_bought,
            total_sold: state.total_sold,
            net_amount: state.net_amount(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpline_core::TradeSide;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transaction_wire_shape() {
        let event = TradeEvent::new(
            TradeSide::Buy,
            "So11111111111111111111111111111111111111abcd".to_string(),
            dec!(1.5),
        );
        let msg = ClientMessage::Transaction(TransactionPayload::from(&event));
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["event"], "transaction");
        assert_eq!(json["data"]["txType"], "BUY");
        assert_eq!(json["data"]["traderPublicKey"], "abcd");
        assert_eq!(json["data"]["solAmount"], "1.5");
    }

    #[test]
    fn test_non_trade_direction_keeps_literal_on_wire() {
        let event = TradeEvent::new(
            TradeSide::Other("CREATE".to_string()),
            "WALLETzzzz".to_string(),
            dec!(0.5),
        );
        let json = serde_json::to_value(TransactionPayload::from(&event)).unwrap();
        assert_eq!(json["txType"], "CREATE");
    }

    #[test]
    fn test_counter_update_wire_shape() {
        let state = AggregateState {
            total_bought: dec!(1.5),
            total_sold: dec!(2),
        };
        let msg = ClientMessage::CounterUpdate(CounterPayload::from(&state));
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["event"], "counterUpdate");
        assert_eq!(json["data"]["totalBought"], "1.5");
        assert_eq!(json["data"]["totalSold"], "2");
        assert_eq!(json["data"]["netAmount"], "-0.5");
    }

    #[test]
    fn test_token_subscription_wire_shape() {
        let msg = ClientMessage::TokenSubscription("MINT123".to_string());
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["event"], "tokenSubscription");
        assert_eq!(json["data"], "MINT123");
    }
}
