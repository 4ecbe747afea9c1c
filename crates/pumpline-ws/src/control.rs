//! Outbound control messages for the upstream feed.
//!
//! The pumpportal data feed is driven by two JSON control methods:
//! `subscribeTokenTrade` and `unsubscribeTokenTrade`, each carrying the
//! affected token mints in a `keys` array.

use serde::{Deserialize, Serialize};

/// A control message written to the upstream feed socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlMessage {
    pub method: String,
    pub keys: Vec<String>,
}

impl ControlMessage {
    /// Subscribe to trade events for a token mint.
    pub fn subscribe_token_trade(token: &str) -> Self {
        Self {
            method: "subscribeTokenTrade".to_string(),
            keys: vec![token.to_string()],
        }
    }

    /// Unsubscribe from trade events for a token mint.
    pub fn unsubscribe_token_trade(token: &str) -> Self {
        Self {
            method: "unsubscribeTokenTrade".to_string(),
            keys: vec![token.to_string()],
        }
    }
}
