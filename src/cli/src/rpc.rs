//! Client for the node's wallet RPC service.
//!
//! Requests are `{"method", "params", "id"}` documents POSTed to
//! `{rpc_url}/wallet`. The node answers with `{"result": ...}` on success or
//! `{"error": ...}` when it rejects the call. Every call is a single attempt.

use crate::config::WalletConfig;
use crate::errors::WalletError;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Sub-path of the wallet service below the configured base URL.
pub const WALLET_PATH: &str = "wallet";

/// Request id used for `getBalance`.
pub const BALANCE_ID: u64 = 666;
/// Request id used for `transfer`.
pub const TRANSFER_ID: u64 = 777;
/// Request id used for `requestAirdrop`.
pub const AIRDROP_ID: u64 = 888;

/// Request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    /// Method name
    pub method: &'a str,
    /// Positional or named parameters
    pub params: Value,
    /// Caller-chosen request id
    pub id: u64,
}

/// Response envelope.
///
/// A `result` that is present is kept even when it is `null`. A `null`
/// `error` is treated as absent.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    /// Value returned on success
    #[serde(default, deserialize_with = "present")]
    pub result: Option<Value>,
    /// Value returned when the node rejects the call
    #[serde(default)]
    pub error: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// HTTP client bound to one node.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl RpcClient {
    /// Creates a client for the node named in the configuration.
    pub fn new(config: &WalletConfig) -> Result<Self, WalletError> {
        let base = format!("{}/", config.rpc_url.trim_end_matches('/'));
        let endpoint = Url::parse(&base)
            .and_then(|base| base.join(WALLET_PATH))
            .map_err(|e| WalletError::Config(format!("Invalid RPC URL '{}': {}", config.rpc_url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| WalletError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    /// Gets the full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Calls a method on the node and returns its `result`.
    pub async fn call(&self, method: &str, params: Value, id: u64) -> Result<Value, WalletError> {
        let request = RpcRequest { method, params, id };
        debug!("RPC call {} (id {}) to {}", method, id, self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(WalletError::transport)?;

        let status = response.status();
        let body = response.text().await.map_err(WalletError::transport)?;
        debug!("RPC {} answered with HTTP {}: {}", method, status, body);

        if status != StatusCode::OK {
            warn!("RPC {} failed with HTTP {}", method, status);
            return Err(WalletError::Transport {
                status: Some(status.as_u16()),
                message: format!("HTTP {}: {}", status.as_u16(), body),
            });
        }

        let response: RpcResponse = serde_json::from_str(&body)
            .map_err(|e| WalletError::InvalidResponse(format!("{} (body: {})", e, body)))?;

        if let Some(error) = response.error {
            return Err(WalletError::Application(render(&error)));
        }

        response
            .result
            .ok_or_else(|| WalletError::InvalidResponse(format!("No result in response: {}", body)))
    }
}

/// Renders a JSON value for display, without quotes around plain strings.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
