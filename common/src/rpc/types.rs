use super::JSON_RPC_VERSION;
use crate::address::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'a str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: &'a Value) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION,
            id,
            method,
            params,
        }
    }
}

// Parameters of `eth_call`, `eth_estimateGas` and `eth_sendTransaction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
}

impl TransactionRequest {
    pub fn call(to: Address, data: String) -> Self {
        Self {
            from: None,
            to,
            data,
            gas: None,
        }
    }

    pub fn transaction(from: Address, to: Address, data: String) -> Self {
        Self {
            from: Some(from),
            to,
            data,
            gas: None,
        }
    }

    pub fn with_gas(mut self, gas: String) -> Self {
        self.gas = Some(gas);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub gas_used: Option<String>,
    // "0x1" success, "0x0" reverted; absent on pre-Byzantium chains
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        !matches!(self.status.as_deref(), Some("0x0") | Some("0x00"))
    }
}
