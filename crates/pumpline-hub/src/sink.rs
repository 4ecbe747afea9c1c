//! Sink abstraction for hub consumers.
//!
//! A sink receives every published event. Delivery must never block the
//! publisher: implementations either write synchronously (console) or hand
//! the event to a bounded channel with `try_send` (WebSocket clients).

use crate::types::{ClientMessage, CounterPayload, TransactionPayload};
use pumpline_core::{AggregateState, TradeEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// An event as fanned out by the hub.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Transaction(TradeEvent),
    CounterUpdate(AggregateState),
    TokenSubscription(String),
}

impl SinkEvent {
    /// The client wire representation of this event.
    pub fn to_client_message(&self) -> ClientMessage {
        match self {
            SinkEvent::Transaction(event) => {
                ClientMessage::Transaction(TransactionPayload::from(event))
            }
            SinkEvent::CounterUpdate(state) => {
                ClientMessage::CounterUpdate(CounterPayload::from(state))
            }
            SinkEvent::TokenSubscription(token) => {
                ClientMessage::TokenSubscription(token.clone())
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    /// The consumer behind the sink has gone away for good.
    #[error("sink closed")]
    Closed,
    /// The consumer is not keeping up; this delivery is dropped.
    #[error("sink backlogged")]
    Backlogged,
}

/// A destination for published events.
///
/// `deliver` is called from the pipeline task and must return without
/// waiting on the consumer.
pub trait TradeSink: Send + Sync {
    fn deliver(&self, event: &SinkEvent) -> Result<(), SinkError>;
}

/// Channel-backed sink for a single connected client.
///
/// Events are serialized to the client wire format and queued on a bounded
/// channel. A full queue means this client is behind; the event is dropped
/// for this client only.
pub struct ChannelSink {
    tx: mpsc::Sender<String>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }
}

impl TradeSink for ChannelSink {
    fn deliver(&self, event: &SinkEvent) -> Result<(), SinkError> {
        let json = serde_json::to_string(&event.to_client_message())
            .map_err(|_| SinkError::Closed)?;
        self.tx.try_send(json).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SinkError::Backlogged,
            mpsc::error::TrySendError::Closed(_) => SinkError::Closed,
        })
    }
}
