//! HTTP client for the pumpportal trade API.

use crate::config::LaunchConfig;
use crate::creator::{BoxFuture, TokenCreator};
use crate::error::{LaunchError, LaunchResult};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Creation request body for the trade endpoint.
#[derive(Debug, Serialize)]
struct CreateRequest {
    action: String,
    #[serde(rename = "tokenMetadata")]
    token_metadata: TokenMetadata,
    #[serde(rename = "denominatedInSol")]
    denominated_in_sol: String,
    amount: Decimal,
    slippage: Decimal,
    #[serde(rename = "priorityFee")]
    priority_fee: Decimal,
    pool: String,
}

#[derive(Debug, Serialize)]
struct TokenMetadata {
    name: String,
    symbol: String,
    uri: String,
}

/// Creation response. The API reports problems through `errors` alongside a
/// 200 status, so the body is inspected regardless of the status line.
#[derive(Debug, Deserialize)]
struct CreateResponse {
    #[serde(default)]
    mint: Option<String>,
    #[serde(default)]
    signature: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

/// Token creator backed by the pumpportal trade endpoint.
///
/// The endpoint signs and submits server-side; one POST either yields the
/// new mint address or a rejection.
pub struct PumpPortalCreator {
    client: Client,
    config: LaunchConfig,
}

impl PumpPortalCreator {
    pub fn new(config: LaunchConfig) -> LaunchResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| LaunchError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn request_body(&self) -> CreateRequest {
        CreateRequest {
            action: "create".to_string(),
            token_metadata: TokenMetadata {
                name: self.config.name.clone(),
                symbol: self.config.symbol.clone(),
                uri: self.config.metadata_uri.clone(),
            },
            denominated_in_sol: "true".to_string(),
            amount: self.config.amount,
            slippage: self.config.slippage,
            priority_fee: self.config.priority_fee,
            pool: "pump".to_string(),
        }
    }

    async fn create(&self) -> LaunchResult<String> {
        info!(
            name = %self.config.name,
            symbol = %self.config.symbol,
            "Requesting token creation"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("api-key", self.config.api_key.as_str())])
            .json(&self.request_body())
            .send()
            .await
            .map_err(|e| LaunchError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LaunchError::Rejected(format!("HTTP {status}: {body}")));
        }

        let body: CreateResponse = response
            .json()
            .await
            .map_err(|e| LaunchError::HttpClient(format!("Failed to parse response: {e}")))?;

        if !body.errors.is_empty() {
            warn!(errors = ?body.errors, "Token creation rejected");
            return Err(LaunchError::Rejected(body.errors.join("; ")));
        }

        let mint = body
            .mint
            .ok_or_else(|| LaunchError::MissingField("mint".to_string()))?;

        info!(%mint, signature = ?body.signature, "Token created");
        Ok(mint)
    }
}

impl TokenCreator for PumpPortalCreator {
    fn create_token(&self) -> BoxFuture<'_, LaunchResult<String>> {
        Box::pin(self.create())
    }
}
