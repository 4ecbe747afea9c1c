//! Write handle for the upstream feed connection.
//!
//! Channel-based so it can be cloned across tasks without touching the
//! socket directly; the connection's message loop owns the actual sink.

use crate::connection::FeedState;
use crate::control::ControlMessage;
use crate::error::{WsError, WsResult};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Clonable handle for writing control messages to the feed.
#[derive(Clone)]
pub struct FeedHandle {
    tx: mpsc::Sender<ControlMessage>,
    state: Arc<RwLock<FeedState>>,
}

impl FeedHandle {
    pub fn new(tx: mpsc::Sender<ControlMessage>, state: Arc<RwLock<FeedState>>) -> Self {
        Self { tx, state }
    }

    /// Queue a control message for sending.
    ///
    /// # Errors
    /// - `WsError::NotConnected` if the connection is not open
    /// - `WsError::SendFailed` if the message loop has gone away
    pub async fn send_control(&self, message: ControlMessage) -> WsResult<()> {
        if !self.is_open() {
            return Err(WsError::NotConnected);
        }

        self.tx
            .send(message)
            .await
            .map_err(|_| WsError::SendFailed("outbound channel closed".to_string()))
    }

    pub fn is_open(&self) -> bool {
        *self.state.read() == FeedState::Open
    }

    pub fn state(&self) -> FeedState {
        *self.state.read()
    }
}
