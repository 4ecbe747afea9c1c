//! Structured logging initialization.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging.
///
/// The filter comes from `RUST_LOG` (default `info`). `RUST_ENV=production`
/// switches to flattened JSON lines; anything else gets compact
/// human-readable output.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match std::env::var("RUST_ENV").as_deref() {
        Ok("production") => registry
            .with(fmt::layer().json().flatten_event(true))
            .init(),
        _ => registry
            .with(fmt::layer().compact().with_target(true))
            .init(),
    }
}
