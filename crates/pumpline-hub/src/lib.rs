//! Fan-out of trade traffic to downstream consumers.
//!
//! The `BroadcastHub` is the single distribution point: the pipeline
//! publishes each accepted trade once, and the hub hands it to every
//! registered sink. Sinks are cheap to add and remove at runtime; the
//! console renderer and the WebSocket server are both just sinks.

pub mod config;
pub mod console;
pub mod hub;
pub mod server;
pub mod sink;
pub mod types;

pub use config::ServerConfig;
pub use console::ConsoleSink;
pub use hub::{BroadcastHub, SinkId};
pub use sink::{ChannelSink, SinkError, SinkEvent, TradeSink};
pub use types::ClientMessage;
