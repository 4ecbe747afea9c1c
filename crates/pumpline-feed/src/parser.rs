//! Raw feed message parsing.
//!
//! A raw message is accepted only if it decodes as an object carrying a
//! non-empty `txType`, a non-empty `traderPublicKey`, and a `solAmount` that
//! coerces to a decimal. Everything else is dropped with a diagnostic;
//! rejection is filtering, not an error path.

use pumpline_core::{TradeEvent, TradeSide};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Accept/reject counters for the parser.
#[derive(Debug, Default)]
pub struct ParserStats {
    accepted_count: AtomicU64,
    rejected_count: AtomicU64,
}

impl ParserStats {
    pub fn accepted(&self) -> u64 {
        self.accepted_count.load(Ordering::Relaxed)
    }

    pub fn rejected(&self) -> u64 {
        self.rejected_count.load(Ordering::Relaxed)
    }
}

/// Raw trade message shape. Fields beyond these three are ignored.
#[derive(Debug, Deserialize)]
struct RawTrade {
    #[serde(rename = "txType", default)]
    tx_type: Option<String>,
    #[serde(rename = "traderPublicKey", default)]
    trader_public_key: Option<String>,
    #[serde(rename = "solAmount", default)]
    sol_amount: Option<Value>,
}

/// Validating parser from raw feed text to `TradeEvent`.
pub struct TradeEventParser {
    stats: ParserStats,
}

impl TradeEventParser {
    pub fn new() -> Self {
        Self {
            stats: ParserStats::default(),
        }
    }

    pub fn stats(&self) -> &ParserStats {
        &self.stats
    }

    /// Parse one raw message. Returns `None` for anything that is not a
    /// well-formed trade; the caller never sees an error.
    pub fn parse(&self, raw: &str) -> Option<TradeEvent> {
        let msg: RawTrade = match serde_json::from_str(raw) {
            Ok(msg) => msg,
            Err(e) => return self.reject(&format!("malformed JSON: {e}")),
        };

        let Some(tx_type) = msg.tx_type.filter(|t| !t.is_empty()) else {
            return self.reject("missing txType");
        };
        let Some(trader) = msg.trader_public_key.filter(|t| !t.is_empty()) else {
            return self.reject("missing traderPublicKey");
        };
        let Some(raw_amount) = msg.sol_amount else {
            return self.reject("missing solAmount");
        };
        let Some(sol_amount) = coerce_amount(&raw_amount) else {
            return self.reject("solAmount is not a number");
        };
        if sol_amount.is_sign_negative() {
            return self.reject("solAmount is negative");
        }

        self.stats.accepted_count.fetch_add(1, Ordering::Relaxed);
        Some(TradeEvent::new(
            TradeSide::normalize(&tx_type),
            trader,
            sol_amount,
        ))
    }

    fn reject(&self, reason: &str) -> Option<TradeEvent> {
        self.stats.rejected_count.fetch_add(1, Ordering::Relaxed);
        debug!(reason, "Dropped raw feed message");
        None
    }
}

impl Default for TradeEventParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Coerce a JSON value to a decimal amount.
///
/// The feed is inconsistent about this field: numbers and numeric strings
/// both occur in the wild.
fn coerce_amount(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
