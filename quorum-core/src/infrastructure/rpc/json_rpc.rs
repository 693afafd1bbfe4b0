//! Minimal JSON-RPC 2.0 client over HTTP shared by the node and ledger-bridge clients.

use log::trace;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug)]
pub enum CallError {
    Transport(String),
    Remote(RemoteError),
    Decode(String),
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(details) => write!(f, "transport: {details}"),
            Self::Remote(err) => write!(f, "remote error {}: {}", err.code, err.message),
            Self::Decode(details) => write!(f, "decode: {details}"),
        }
    }
}

pub struct JsonRpcClient {
    url: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CallError> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|err| CallError::Transport(err.to_string()))?;
        Ok(Self { url: url.into(), client, next_id: AtomicU64::new(1) })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, CallError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        trace!("json-rpc request url={} method={} id={}", self.url, method, id);
        let body = json!({ "jsonrpc": "2.0", "method": method, "params": params, "id": id });

        let response =
            self.client.post(&self.url).json(&body).send().await.map_err(|err| CallError::Transport(err.to_string()))?;
        let response: Value = response.json().await.map_err(|err| CallError::Decode(err.to_string()))?;

        if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
            let remote: RemoteError = serde_json::from_value(error.clone()).map_err(|err| CallError::Decode(err.to_string()))?;
            return Err(CallError::Remote(remote));
        }
        let result = response.get("result").cloned().ok_or_else(|| CallError::Decode("missing result".to_string()))?;
        serde_json::from_value(result).map_err(|err| CallError::Decode(err.to_string()))
    }
}
