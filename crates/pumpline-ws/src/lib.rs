//! WebSocket client for the upstream pumpportal market-data feed.
//!
//! Provides:
//! - A single-connection feed client with an explicit
//!   `Disconnected -> Connecting -> Open -> Closed` lifecycle (no reconnect;
//!   once closed the instance is terminal)
//! - A clonable, channel-based write handle for control messages
//! - Single-token subscription management (unsubscribe-then-subscribe swap)

pub mod connection;
pub mod control;
pub mod error;
pub mod handle;
pub mod subscription;

pub use connection::{FeedConfig, FeedConnection, FeedState};
pub use control::ControlMessage;
pub use error::{WsError, WsResult};
pub use handle::FeedHandle;
pub use subscription::SubscriptionManager;

use std::sync::Once;

static INIT_CRYPTO: Once = Once::new();

/// Initialize the TLS crypto provider.
/// Must be called before any WebSocket connections are made.
pub fn init_crypto() {
    INIT_CRYPTO.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
