//! Single-token subscription management.
//!
//! At most one token is subscribed at a time. Swapping tokens emits an
//! unsubscribe for the previous token followed by a subscribe for the new
//! one, in that order, before any further control traffic.

use crate::control::ControlMessage;
use crate::error::WsResult;
use crate::handle::FeedHandle;
use parking_lot::Mutex;
use tracing::info;

/// Tracks the single active token subscription on the upstream feed.
///
/// The subscription slot has one writer (the owning task); the feed handle
/// takes care of connection-state checks.
pub struct SubscriptionManager {
    handle: FeedHandle,
    active_token: Mutex<Option<String>>,
}

impl SubscriptionManager {
    pub fn new(handle: FeedHandle) -> Self {
        Self {
            handle,
            active_token: Mutex::new(None),
        }
    }

    /// Swap the active token subscription.
    ///
    /// If a different token is currently active, an unsubscribe for it is
    /// sent first. The subscribe message is sent even when `token` is already
    /// active; the upstream treats the duplicate as a no-op and deduplicating
    /// here would change observable control traffic.
    ///
    /// # Errors
    /// `WsError::NotConnected` if the feed connection is not open; the stored
    /// active token is only updated after both sends succeed.
    pub async fn set_active_token(&self, token: &str) -> WsResult<()> {
        let previous = self.active_token.lock().clone();

        if let Some(prev) = previous.filter(|p| p != token) {
            self.handle
                .send_control(ControlMessage::unsubscribe_token_trade(&prev))
                .await?;
            info!(token = %prev, "Unsubscribed from token trades");
        }

        self.handle
            .send_control(ControlMessage::subscribe_token_trade(token))
            .await?;
        *self.active_token.lock() = Some(token.to_string());
        info!(%token, "Subscribed to token trades");

        Ok(())
    }

    /// The currently subscribed token, if any.
    pub fn active_token(&self) -> Option<String> {
        self.active_token.lock().clone()
    }
}
