//! End-to-end pipeline tests: raw feed text in, sink deliveries out.

use parking_lot::{Mutex, RwLock};
use pumpline_bot::{launch_token, run_pipeline};
use pumpline_hub::{BroadcastHub, SinkError, SinkEvent, TradeSink};
use pumpline_launcher::MockTokenCreator;
use pumpline_ws::{ControlMessage, FeedHandle, FeedState, SubscriptionManager};
use rust_decimal_macros::dec;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl TradeSink for RecordingSink {
    fn deliver(&self, event: &SinkEvent) -> Result<(), SinkError> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

fn open_feed() -> (SubscriptionManager, mpsc::Receiver<ControlMessage>) {
    let (tx, rx) = mpsc::channel(8);
    let state = Arc::new(RwLock::new(FeedState::Open));
    (SubscriptionManager::new(FeedHandle::new(tx, state)), rx)
}

#[tokio::test]
async fn test_pipeline_folds_trades_into_totals() {
    let hub = Arc::new(BroadcastHub::new());
    let sink = Arc::new(RecordingSink::default());
    hub.subscribe(sink.clone());

    let (tx, rx) = mpsc::channel(8);
    let pipeline = tokio::spawn(run_pipeline(hub.clone(), rx));

    // A string amount, a junk message, and a numeric amount.
    tx.send(r#"{"txType":"buy","traderPublicKey":"WALLETaaaa","solAmount":"1.5"}"#.to_string())
        .await
        .unwrap();
    tx.send("not json".to_string()).await.unwrap();
    tx.send(r#"{"txType":"sell","traderPublicKey":"WALLETbbbb","solAmount":2}"#.to_string())
        .await
        .unwrap();
    drop(tx);
    pipeline.await.unwrap();

    let state = hub.last_state();
    assert_eq!(state.total_bought, dec!(1.5));
    assert_eq!(state.total_sold, dec!(2));
    assert_eq!(state.net_amount(), dec!(-0.5));

    // Replayed counter on subscribe, then transaction + counter per trade.
    // The junk message produced nothing.
    let events = sink.events.lock().clone();
    assert_eq!(events.len(), 5);
    assert!(matches!(events[1], SinkEvent::Transaction(_)));
    assert!(matches!(events[2], SinkEvent::CounterUpdate(_)));
    assert!(matches!(events[3], SinkEvent::Transaction(_)));
    match &events[4] {
        SinkEvent::CounterUpdate(state) => assert_eq!(state.net_amount(), dec!(-0.5)),
        other => panic!("expected counter update, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pipeline_stops_when_feed_closes() {
    let hub = Arc::new(BroadcastHub::new());
    let (tx, rx) = mpsc::channel::<String>(8);
    let pipeline = tokio::spawn(run_pipeline(hub, rx));

    drop(tx);
    // Returns rather than hanging.
    pipeline.await.unwrap();
}

#[tokio::test]
async fn test_launch_subscribes_then_announces() {
    let hub = BroadcastHub::new();
    let sink = Arc::new(RecordingSink::default());
    hub.subscribe(sink.clone());

    let creator = MockTokenCreator::with_mint("MINT_XYZ");
    let (subscriptions, mut control_rx) = open_feed();

    let mint = launch_token(&creator, &subscriptions, &hub).await.unwrap();
    assert_eq!(mint, "MINT_XYZ");

    // Upstream subscription goes out before clients hear about the token.
    let sent = control_rx.recv().await.unwrap();
    assert_eq!(sent, ControlMessage::subscribe_token_trade("MINT_XYZ"));
    assert!(sink
        .events
        .lock()
        .contains(&SinkEvent::TokenSubscription("MINT_XYZ".to_string())));
    assert_eq!(hub.active_token(), Some("MINT_XYZ".to_string()));
}

#[tokio::test]
async fn test_launch_failure_sends_no_control_traffic() {
    let hub = BroadcastHub::new();
    let creator = MockTokenCreator::failing("insufficient balance");
    let (subscriptions, mut control_rx) = open_feed();

    let result = launch_token(&creator, &subscriptions, &hub).await;
    assert!(result.is_err());
    assert!(control_rx.try_recv().is_err());
    assert_eq!(hub.active_token(), None);
}
