//! Main application orchestration.
//!
//! Startup order matters: the client server and console sink are up before
//! the token exists, so the first trade after the subscription already
//! reaches every consumer.

use crate::config::AppConfig;
use crate::error::AppResult;
use pumpline_feed::{Aggregator, TradeEventParser};
use pumpline_hub::{server::run_server, BroadcastHub, ConsoleSink};
use pumpline_launcher::{PumpPortalCreator, TokenCreator};
use pumpline_ws::{FeedConfig, FeedConnection, SubscriptionManager};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Main application.
pub struct Application {
    config: AppConfig,
    hub: Arc<BroadcastHub>,
    creator: Arc<dyn TokenCreator>,
}

impl Application {
    /// Create the application with the real token creator.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let creator = Arc::new(PumpPortalCreator::new(config.launcher.clone())?);
        Ok(Self::with_creator(config, creator))
    }

    /// Create the application with an injected token creator.
    pub fn with_creator(config: AppConfig, creator: Arc<dyn TokenCreator>) -> Self {
        Self {
            config,
            hub: Arc::new(BroadcastHub::new()),
            creator,
        }
    }

    pub fn hub(&self) -> Arc<BroadcastHub> {
        self.hub.clone()
    }

    /// Run until the upstream feed closes or a shutdown signal arrives.
    pub async fn run(self) -> AppResult<()> {
        self.hub.subscribe(Arc::new(ConsoleSink::new()));

        if self.config.server.enabled {
            let hub = self.hub.clone();
            let server_config = self.config.server.clone();
            tokio::spawn(async move {
                if let Err(e) = run_server(hub, server_config).await {
                    error!(error = %e, "Client server failed");
                }
            });
        }

        let (message_tx, message_rx) = mpsc::channel::<String>(self.config.channel_capacity);
        let feed_config = FeedConfig {
            url: self.config.ws_url.clone(),
            ..FeedConfig::default()
        };
        let connection = FeedConnection::connect(feed_config, message_tx).await?;
        let subscriptions = SubscriptionManager::new(connection.handle());

        // Token creation failure aborts startup; there is nothing to relay
        // without a token.
        let mint = launch_token(self.creator.as_ref(), &subscriptions, &self.hub).await?;
        info!(%mint, "Watching token trades");

        tokio::select! {
            _ = run_pipeline(self.hub.clone(), message_rx) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
            }
        }

        connection.shutdown();
        Ok(())
    }
}

/// Create the token, subscribe to its trades, and announce it to clients.
pub async fn launch_token(
    creator: &dyn TokenCreator,
    subscriptions: &SubscriptionManager,
    hub: &BroadcastHub,
) -> AppResult<String> {
    let mint = creator.create_token().await?;
    subscriptions.set_active_token(&mint).await?;
    hub.announce_subscription_change(&mint);
    Ok(mint)
}

/// Pump raw feed messages through parse, aggregate, and publish.
///
/// One message at a time: the aggregate state published alongside each trade
/// is exactly the state as of that trade. Returns when the channel closes,
/// which means the upstream connection is gone; totals stay in memory and
/// recovery is left to the operator.
pub async fn run_pipeline(hub: Arc<BroadcastHub>, mut message_rx: mpsc::Receiver<String>) {
    let parser = TradeEventParser::new();
    let mut aggregator = Aggregator::new();

    while let Some(raw) = message_rx.recv().await {
        if let Some(event) = parser.parse(&raw) {
            let state = aggregator.apply(&event);
            hub.publish(&event, &state);
        }
    }

    info!(
        accepted = parser.stats().accepted(),
        rejected = parser.stats().rejected(),
        "Upstream feed closed, pipeline stopped"
    );
}
