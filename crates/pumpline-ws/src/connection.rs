//! Upstream feed connection.
//!
//! One `FeedConnection` owns the single outbound socket to the market-data
//! service. Inbound text frames are forwarded raw, in arrival order, over a
//! bounded channel; the consumer is responsible for parsing. There is no
//! automatic reconnect: once the socket closes the connection is terminal and
//! the owner must create a new one.

use crate::control::ControlMessage;
use crate::error::{WsError, WsResult};
use crate::handle::FeedHandle;
use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async_tls_with_config, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Connection configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// WebSocket URL of the market-data feed.
    pub url: String,
    /// Capacity of the outbound control-message channel.
    pub outbound_capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "wss://pumpportal.fun/api/data".to_string(),
            outbound_capacity: 32,
        }
    }
}

/// Connection lifecycle state. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Disconnected,
    Connecting,
    Open,
    Closed,
}

/// Handle-owning side of the upstream feed connection.
///
/// `connect` resolves once the socket is open; a background task then drives
/// the read/write loop until close. Dropping `message_tx` on exit is how the
/// consumer observes end-of-stream.
pub struct FeedConnection {
    state: Arc<RwLock<FeedState>>,
    outbound_tx: mpsc::Sender<ControlMessage>,
    shutdown_token: CancellationToken,
}

impl FeedConnection {
    /// Establish the upstream socket and start the message loop.
    ///
    /// Fails with `WsError::ConnectionFailed` if the handshake cannot
    /// complete. Each inbound text frame is delivered to `message_tx` in
    /// arrival order.
    pub async fn connect(config: FeedConfig, message_tx: mpsc::Sender<String>) -> WsResult<Self> {
        let state = Arc::new(RwLock::new(FeedState::Connecting));
        info!(url = %config.url, "Connecting to upstream feed");

        let (ws_stream, _response) = connect_async_tls_with_config(&config.url, None, true, None)
            .await
            .map_err(|e| {
                *state.write() = FeedState::Disconnected;
                WsError::ConnectionFailed(e.to_string())
            })?;

        *state.write() = FeedState::Open;
        info!("Upstream feed connected");

        let (outbound_tx, outbound_rx) = mpsc::channel(config.outbound_capacity);
        let shutdown_token = CancellationToken::new();

        tokio::spawn(run_message_loop(
            ws_stream,
            message_tx,
            outbound_rx,
            state.clone(),
            shutdown_token.clone(),
        ));

        Ok(Self {
            state,
            outbound_tx,
            shutdown_token,
        })
    }

    /// Get a clonable write handle for control messages.
    pub fn handle(&self) -> FeedHandle {
        FeedHandle::new(self.outbound_tx.clone(), self.state.clone())
    }

    /// Current connection state.
    pub fn state(&self) -> FeedState {
        *self.state.read()
    }

    pub fn is_open(&self) -> bool {
        self.state() == FeedState::Open
    }

    /// Request a graceful close of the upstream socket.
    pub fn shutdown(&self) {
        info!("Feed connection shutdown requested");
        self.shutdown_token.cancel();
    }
}

async fn run_message_loop(
    ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    message_tx: mpsc::Sender<String>,
    mut outbound_rx: mpsc::Receiver<ControlMessage>,
    state: Arc<RwLock<FeedState>>,
    shutdown_token: CancellationToken,
) {
    let (mut write, mut read) = ws_stream.split();
    let mut outbound_open = true;

    loop {
        tokio::select! {
            () = shutdown_token.cancelled() => {
                if let Err(e) = write.send(Message::Close(None)).await {
                    warn!(?e, "Failed to send close frame during shutdown");
                }
                info!("Upstream feed closed by shutdown request");
                break;
            }

            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        // Arrival order is preserved by awaiting the send;
                        // the pipeline is the sole consumer.
                        if message_tx.send(text.to_string()).await.is_err() {
                            warn!("Feed message receiver dropped, closing connection");
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        debug!("Received ping, sending pong");
                        if let Err(e) = write.send(Message::Pong(data)).await {
                            error!(?e, "Failed to send pong");
                            break;
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let (code, reason) = frame
                            .map(|f| (u16::from(f.code), f.reason.to_string()))
                            .unwrap_or((1000, "Normal close".to_string()));
                        warn!(code, %reason, "Upstream feed closed by server");
                        break;
                    }
                    Some(Err(e)) => {
                        error!(?e, "Upstream feed read error");
                        break;
                    }
                    None => {
                        warn!("Upstream feed stream ended");
                        break;
                    }
                    _ => {}
                }
            }

            outbound = outbound_rx.recv(), if outbound_open => {
                match outbound {
                    Some(control) => {
                        let payload = match serde_json::to_string(&control) {
                            Ok(p) => p,
                            Err(e) => {
                                error!(?e, "Failed to encode control message");
                                continue;
                            }
                        };
                        debug!(method = %control.method, "Sending control message");
                        if let Err(e) = write.send(Message::Text(payload)).await {
                            error!(?e, "Upstream feed write error");
                            break;
                        }
                    }
                    None => {
                        // All handles dropped; nothing left to write, keep reading.
                        debug!("All feed handles dropped");
                        outbound_open = false;
                    }
                }
            }
        }
    }

    *state.write() = FeedState::Closed;
    // message_tx drops here; the pipeline sees end-of-stream.
}
