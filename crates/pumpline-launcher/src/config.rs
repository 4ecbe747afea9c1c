//! Launch configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters for creating the token.
///
/// The metadata (image, description, socials) is uploaded ahead of time;
/// only the resulting URI is carried here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Trade API endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key for the trade endpoint.
    #[serde(default)]
    pub api_key: String,
    /// Token name.
    pub name: String,
    /// Token ticker symbol.
    pub symbol: String,
    /// URI of the pre-uploaded token metadata.
    pub metadata_uri: String,
    /// Initial dev buy in SOL.
    #[serde(default = "default_amount")]
    pub amount: Decimal,
    /// Allowed slippage in percent.
    #[serde(default = "default_slippage")]
    pub slippage: Decimal,
    /// Priority fee in SOL.
    #[serde(default = "default_priority_fee")]
    pub priority_fee: Decimal,
}

fn default_endpoint() -> String {
    "https://pumpportal.fun/api/trade".to_string()
}

fn default_amount() -> Decimal {
    Decimal::new(1, 2) // 0.01 SOL
}

fn default_slippage() -> Decimal {
    Decimal::new(5, 1) // 0.5%
}

fn default_priority_fee() -> Decimal {
    Decimal::new(5, 4) // 0.0005 SOL
}
