//! Client-facing HTTP server using axum.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use futures_util::stream::StreamExt;
use futures_util::SinkExt;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::hub::BroadcastHub;
use crate::sink::ChannelSink;
use crate::types::CounterPayload;

/// Bounded pool of WebSocket client slots.
///
/// A claimed slot lives as long as its guard, so the count tracks open
/// connections exactly even when the handler exits early.
pub struct ClientSlots {
    active: AtomicUsize,
    limit: usize,
}

impl ClientSlots {
    pub fn new(limit: usize) -> Arc<Self> {
        Arc::new(Self {
            active: AtomicUsize::new(0),
            limit,
        })
    }

    pub fn try_claim(self: &Arc<Self>) -> Option<SlotGuard> {
        self.active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.limit).then_some(n + 1)
            })
            .ok()
            .map(|_| SlotGuard {
                slots: Arc::clone(self),
            })
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }
}

pub struct SlotGuard {
    slots: Arc<ClientSlots>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.slots.active.fetch_sub(1, Ordering::Release);
    }
}

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    hub: Arc<BroadcastHub>,
    client_slots: Arc<ClientSlots>,
    config: ServerConfig,
}

impl AppState {
    pub fn new(hub: Arc<BroadcastHub>, config: ServerConfig) -> Self {
        Self {
            hub,
            client_slots: ClientSlots::new(config.max_connections),
            config,
        }
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct StateResponse {
    token: Option<String>,
    counters: CounterPayload,
}

/// Current token and counters as JSON.
async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let counters = CounterPayload::from(&state.hub.last_state());
    Json(StateResponse {
        token: state.hub.active_token(),
        counters,
    })
}

/// WebSocket upgrade handler. The claimed slot rides along into the
/// connection handler and frees itself when the connection ends.
async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let Some(slot) = state.client_slots.try_claim() else {
        warn!(
            active = state.client_slots.active(),
            limit = state.config.max_connections,
            "WebSocket connection limit reached"
        );
        return (StatusCode::SERVICE_UNAVAILABLE, "Too many connections").into_response();
    };

    ws.on_upgrade(move |socket| handle_ws_connection(socket, state, slot))
}

/// Handle a WebSocket connection for its whole lifetime.
///
/// The connection is a sink on the hub: events arrive on a bounded channel
/// filled by `ChannelSink::deliver` and are forwarded to the socket here.
/// The hub replays the active token and current counters during `subscribe`,
/// so a client is up to date before the first live trade arrives.
async fn handle_ws_connection(socket: WebSocket, state: AppState, _slot: SlotGuard) {
    info!(
        clients = state.client_slots.active(),
        "New WebSocket client"
    );

    let (mut sender, mut receiver) = socket.split();

    let (tx, mut rx) = mpsc::channel::<String>(state.config.client_queue_depth);
    let sink_id = state.hub.subscribe(Arc::new(ChannelSink::new(tx)));

    // Drain the client side for close frames; pings are answered by axum.
    let mut incoming_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Err(e) => {
                    debug!(error = %e, "WebSocket receive error");
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            queued = rx.recv() => {
                match queued {
                    Some(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            debug!("Failed to send message, client disconnected");
                            break;
                        }
                    }
                    None => {
                        debug!("Hub side of client channel closed");
                        break;
                    }
                }
            }
            _ = &mut incoming_task => {
                debug!("Incoming task completed, closing connection");
                break;
            }
        }
    }

    state.hub.unsubscribe(sink_id);
    info!(
        clients = state.client_slots.active().saturating_sub(1),
        "WebSocket client disconnected"
    );
}

/// Run the client server until the listener fails.
pub async fn run_server(
    hub: Arc<BroadcastHub>,
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let port = config.port;
    let app = create_router(AppState::new(hub, config));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(port, "Starting client server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
