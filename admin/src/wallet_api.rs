use crate::{error::AdminError, provider::SharedProvider};
use gpmf_common::{
    abi::{from_hex_data, parse_quantity},
    address::Address,
    chain::{parse_chain_id, ChainParams},
    rpc::*,
};
use log::trace;
use primitive_types::U256;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

// Typed calls over an EIP-1193 provider
#[derive(Clone)]
pub struct WalletApi {
    provider: SharedProvider,
}

impl WalletApi {
    pub fn new(provider: SharedProvider) -> Self {
        Self { provider }
    }

    async fn request<P: Serialize, R: DeserializeOwned>(&self, method: &'static str, params: P) -> Result<R, AdminError> {
        let params = serde_json::to_value(params)
            .map_err(|e| AdminError::InvalidResponse(method, e.to_string()))?;
        let value = self.provider.request(method, params).await?;
        serde_json::from_value(value).map_err(|e| AdminError::InvalidResponse(method, e.to_string()))
    }

    // Ask the wallet to expose its accounts, prompting the user if needed
    pub async fn request_accounts(&self) -> Result<Vec<Address>, AdminError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("request_accounts");
        }
        self.request(ETH_REQUEST_ACCOUNTS, json!([])).await
    }

    pub async fn chain_id(&self) -> Result<u64, AdminError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("chain_id");
        }
        let value: String = self.request(ETH_CHAIN_ID, json!([])).await?;
        parse_chain_id(&value).ok_or(AdminError::InvalidChainId(value))
    }

    pub async fn switch_chain(&self, params: &ChainParams) -> Result<(), AdminError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("switch_chain: {}", params.chain_id);
        }
        let _: Value = self
            .request(WALLET_SWITCH_ETHEREUM_CHAIN, [params.switch_chain_parameter()])
            .await?;
        Ok(())
    }

    pub async fn add_chain(&self, params: &ChainParams) -> Result<(), AdminError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("add_chain: {}", params.chain_id);
        }
        let _: Value = self
            .request(WALLET_ADD_ETHEREUM_CHAIN, [params.add_chain_parameter()])
            .await?;
        Ok(())
    }

    pub async fn get_balance(&self, address: &Address) -> Result<U256, AdminError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get_balance: {}", address);
        }
        let value: String = self.request(ETH_GET_BALANCE, json!([address, LATEST_BLOCK])).await?;
        Ok(parse_quantity(&value)?)
    }

    // Read-only contract call, returns the raw ABI encoded result
    pub async fn call(&self, request: &TransactionRequest) -> Result<Vec<u8>, AdminError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("call: {}", request.to);
        }
        let value: String = self.request(ETH_CALL, json!([request, LATEST_BLOCK])).await?;
        Ok(from_hex_data(&value)?)
    }

    pub async fn estimate_gas(&self, request: &TransactionRequest) -> Result<U256, AdminError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("estimate_gas: {}", request.to);
        }
        let value: String = self.request(ETH_ESTIMATE_GAS, [request]).await?;
        Ok(parse_quantity(&value)?)
    }

    // Hand the transaction to the wallet for signing and broadcast, returns its hash
    pub async fn send_transaction(&self, request: &TransactionRequest) -> Result<String, AdminError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("send_transaction: {}", request.to);
        }
        self.request(ETH_SEND_TRANSACTION, [request]).await
    }

    // None while the transaction is still pending
    pub async fn get_transaction_receipt(&self, hash: &str) -> Result<Option<TransactionReceipt>, AdminError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get_transaction_receipt: {}", hash);
        }
        self.request(ETH_GET_TRANSACTION_RECEIPT, [hash]).await
    }
}
