use super::Eip1193Provider;
use async_trait::async_trait;
use gpmf_common::rpc::{ProviderError, RpcRequest, ETH_ACCOUNTS, ETH_REQUEST_ACCOUNTS};
use log::{debug, trace};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

// Provider reached over HTTP JSON-RPC, typically a local signer
// that holds the keys and relays to the chain
pub struct HttpProvider {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpProvider {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, ProviderError> {
        let url = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_owned()
        } else {
            format!("http://{}", url)
        };

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ProviderError::transport)?;

        Ok(Self {
            client,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send(&self, method: &str, params: &Value) -> Result<Value, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method, params);
        if log::log_enabled!(log::Level::Trace) {
            trace!("request #{} {} to {}", id, method, self.url);
        }

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::transport)?;

        let status = response.status();
        let body: RpcResponse = response.json().await.map_err(|e| {
            if status.is_success() {
                ProviderError::transport(format!("invalid response body: {}", e))
            } else {
                ProviderError::transport(format!("HTTP error {}", status.as_u16()))
            }
        })?;

        into_result(body)
    }
}

// JSON-RPC errors become provider errors, a missing result is null
fn into_result(body: RpcResponse) -> Result<Value, ProviderError> {
    if let Some(error) = body.error {
        return Err(ProviderError::from_json(&error));
    }

    Ok(body.result.unwrap_or(Value::Null))
}

// Plain nodes and some signers have no account prompt, ask for the known ones
fn falls_back_to_accounts(method: &str, error: &ProviderError) -> bool {
    method == ETH_REQUEST_ACCOUNTS && error.is_method_not_found()
}

#[async_trait]
impl Eip1193Provider for HttpProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        match self.send(method, &params).await {
            Err(e) if falls_back_to_accounts(method, &e) => {
                if log::log_enabled!(log::Level::Debug) {
                    debug!("{} not supported by {}, falling back to {}", ETH_REQUEST_ACCOUNTS, self.url, ETH_ACCOUNTS);
                }
                self.send(ETH_ACCOUNTS, &params).await
            }
            result => result,
        }
    }
}
