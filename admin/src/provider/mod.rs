mod http;

use async_trait::async_trait;
use gpmf_common::rpc::ProviderError;
use serde_json::Value;
use std::sync::Arc;

pub use http::HttpProvider;

// EIP-1193 style request interface: one method, JSON in, JSON out.
// Key custody, signing and chain switching live behind it.
#[async_trait]
pub trait Eip1193Provider: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

pub type SharedProvider = Arc<dyn Eip1193Provider>;
