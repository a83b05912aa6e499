//! JSON-RPC client for a Steem API node.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_RPC_URL: &str = "https://api.steemit.com";
pub const DEFAULT_LOOKUP_LIMIT: u32 = 20;

/// The subset of `condenser_api.get_accounts` we read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountInfo {
    pub id: u64,
    pub name: String,
    pub owner: Authority,
    pub active: Authority,
    pub posting: Authority,
    pub memo_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Authority {
    pub weight_threshold: u32,
    /// `[public_key, weight]` pairs
    pub key_auths: Vec<(String, u32)>,
}

impl Authority {
    pub fn public_keys(&self) -> impl Iterator<Item = &str> {
        self.key_auths.iter().map(|(key, _)| key.as_str())
    }
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Decode a JSON-RPC response body, turning an `error` member into `Err`.
pub fn parse_rpc_response<T: DeserializeOwned>(method: &str, body: &str) -> Result<T> {
    let response: RpcResponse<T> = serde_json::from_str(body)
        .with_context(|| format!("Malformed response to {}", method))?;
    if let Some(error) = response.error {
        anyhow::bail!("{} failed ({}): {}", method, error.code, error.message);
    }
    response
        .result
        .with_context(|| format!("Response to {} has no result", method))
}

/// Steem API client
#[derive(Debug, Clone)]
pub struct SteemClient {
    http_client: Client,
    url: String,
    lookup_limit: u32,
}

impl SteemClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("esteem/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http_client,
            url: url.into(),
            lookup_limit: DEFAULT_LOOKUP_LIMIT,
        })
    }

    /// Number of names requested per typeahead lookup.
    pub fn with_lookup_limit(mut self, limit: u32) -> Self {
        self.lookup_limit = limit.max(1);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn lookup_limit(&self) -> u32 {
        self.lookup_limit
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        };
        debug!("RPC {} -> {}", method, self.url);

        let response = self
            .http_client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read RPC response")?;
        if !status.is_success() {
            warn!("RPC {} returned {}", method, status);
            anyhow::bail!("RPC node error ({}): {}", status, body);
        }

        parse_rpc_response(method, &body)
    }

    /// Account names starting at `lower_bound`, in lexical order.
    pub async fn lookup_accounts(&self, lower_bound: &str, limit: u32) -> Result<Vec<String>> {
        self.call(
            "condenser_api.lookup_accounts",
            json!([lower_bound, limit]),
        )
        .await
    }

    /// Full records for the named accounts; unknown names are skipped.
    pub async fn get_accounts(&self, names: &[&str]) -> Result<Vec<AccountInfo>> {
        self.call("condenser_api.get_accounts", json!([names])).await
    }
}
