//! Client server configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the WebSocket/REST client server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Enable the client server.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum concurrent WebSocket connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// Per-client outbound queue depth before messages are dropped.
    #[serde(default = "default_client_queue_depth")]
    pub client_queue_depth: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> usize {
    64
}

fn default_client_queue_depth() -> usize {
    32
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            port: default_port(),
            max_connections: default_max_connections(),
            client_queue_depth: default_client_queue_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: ServerConfig = toml::from_str("port = 9000").unwrap();
        assert!(config.enabled);
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_connections, 64);
        assert_eq!(config.client_queue_depth, 32);
    }
}
