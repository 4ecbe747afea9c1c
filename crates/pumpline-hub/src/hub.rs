//! The broadcast hub.

use crate::sink::{SinkEvent, TradeSink};
use dashmap::DashMap;
use parking_lot::RwLock;
use pumpline_core::{AggregateState, TradeEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Identifier for a registered sink, returned from `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(u64);

/// Fans published events out to every registered sink.
///
/// Registration is concurrent (connection accept tasks subscribe while the
/// pipeline publishes), so the registry is a `DashMap`. The last published
/// counter state and the active token are cached so a late joiner can be
/// brought up to date immediately on subscribe.
pub struct BroadcastHub {
    sinks: DashMap<SinkId, Arc<dyn TradeSink>>,
    next_id: AtomicU64,
    last_state: RwLock<AggregateState>,
    active_token: RwLock<Option<String>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self {
            sinks: DashMap::new(),
            next_id: AtomicU64::new(1),
            last_state: RwLock::new(AggregateState::default()),
            active_token: RwLock::new(None),
        }
    }

    /// Register a sink and replay current state to it.
    ///
    /// The new sink immediately receives the active token announcement (if a
    /// token is subscribed) followed by the current counter state, so a
    /// client joining mid-stream renders the same totals as everyone else
    /// without waiting for the next trade.
    ///
    /// Replay and registration happen under the state locks: a publish
    /// cannot slip between the replayed snapshot and the map insert, so the
    /// sink either sees an event in its replayed totals or receives it live.
    pub fn subscribe(&self, sink: Arc<dyn TradeSink>) -> SinkId {
        let id = SinkId(self.next_id.fetch_add(1, Ordering::Relaxed));

        let state = self.last_state.read();
        let token = self.active_token.read();
        if let Some(token) = token.as_deref() {
            self.try_deliver(id, &sink, &SinkEvent::TokenSubscription(token.to_string()));
        }
        self.try_deliver(id, &sink, &SinkEvent::CounterUpdate(state.clone()));

        self.sinks.insert(id, sink);
        debug!(sink_id = id.0, sinks = self.sinks.len(), "Sink registered");
        id
    }

    /// Remove a sink. Removing an unknown id is a no-op.
    pub fn unsubscribe(&self, id: SinkId) {
        if self.sinks.remove(&id).is_some() {
            debug!(sink_id = id.0, sinks = self.sinks.len(), "Sink removed");
        }
    }

    /// Publish one trade and the counter state as of after it.
    ///
    /// Each sink gets the transaction followed by the counter update. A
    /// failing sink is logged and skipped for this delivery; it stays
    /// registered and gets the next one.
    pub fn publish(&self, event: &TradeEvent, state: &AggregateState) {
        // Held through the delivery loop to exclude concurrent subscribes.
        let mut last_state = self.last_state.write();
        *last_state = state.clone();

        let transaction = SinkEvent::Transaction(event.clone());
        let counter = SinkEvent::CounterUpdate(state.clone());
        for entry in self.sinks.iter() {
            self.try_deliver(*entry.key(), entry.value(), &transaction);
            self.try_deliver(*entry.key(), entry.value(), &counter);
        }
    }

    /// Announce a new active token to all sinks and record it for replay.
    pub fn announce_subscription_change(&self, token: &str) {
        // Same discipline as `publish`: no subscribe can replay the old
        // token and also miss this announcement.
        let mut active_token = self.active_token.write();
        *active_token = Some(token.to_string());

        let event = SinkEvent::TokenSubscription(token.to_string());
        for entry in self.sinks.iter() {
            self.try_deliver(*entry.key(), entry.value(), &event);
        }
    }

    /// The token currently announced to clients, if any.
    pub fn active_token(&self) -> Option<String> {
        self.active_token.read().clone()
    }

    /// The last published counter state.
    pub fn last_state(&self) -> AggregateState {
        self.last_state.read().clone()
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    fn try_deliver(&self, id: SinkId, sink: &Arc<dyn TradeSink>, event: &SinkEvent) {
        if let Err(e) = sink.deliver(event) {
            warn!(sink_id = id.0, error = %e, "Sink delivery failed");
        }
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}
