//! Application configuration.

use crate::error::{AppError, AppResult};
use pumpline_hub::ServerConfig;
use pumpline_launcher::LaunchConfig;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream trade feed URL.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Depth of the raw-message channel between the feed and the pipeline.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Client server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Token creation settings.
    pub launcher: LaunchConfig,
}

fn default_ws_url() -> String {
    "wss://pumpportal.fun/api/data".to_string()
}

fn default_channel_capacity() -> usize {
    1000
}

impl AppConfig {
    /// Load configuration from file.
    ///
    /// The path comes from the `PUMPLINE_CONFIG` environment variable, with
    /// `config/default.toml` as the fallback.
    pub fn load() -> AppResult<Self> {
        let config_path =
            std::env::var("PUMPLINE_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
        Self::from_file(&config_path)
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
