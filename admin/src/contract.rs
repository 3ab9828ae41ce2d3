use crate::{error::AdminError, wallet_api::WalletApi};
use gpmf_common::{
    abi::{self, to_hex_data, to_quantity, ContractCall, Token},
    address::Address,
    config::apply_gas_margin,
    lockup::LockupRecord,
    rpc::{TransactionReceipt, TransactionRequest},
};
use log::{debug, info, trace};
use primitive_types::U256;
use std::time::Duration;
use tokio::time::sleep;

// Read methods
pub const NAME: &str = "name()";
pub const SYMBOL: &str = "symbol()";
pub const DECIMALS: &str = "decimals()";
pub const TOTAL_SUPPLY: &str = "totalSupply()";
pub const PAUSED: &str = "paused()";
pub const OWNER: &str = "owner()";
pub const BALANCE_OF: &str = "balanceOf(address)";
pub const LOCKED_INFO: &str = "lockedInfo(address)";
pub const UNLOCKED_BALANCE_OF: &str = "unlockedBalanceOf(address)";
pub const LOCKED_BALANCE: &str = "lockedBalance(address)";

// State changing methods
pub const PAUSE: &str = "pause()";
pub const UNPAUSE: &str = "unpause()";
pub const SET_LOCKUP: &str = "setLockup(address,uint256,uint256)";
pub const EXTEND_LOCKUP: &str = "extendLockup(address,uint256)";
pub const DECREASE_LOCK_AMOUNT: &str = "decreaseLockAmount(address,uint256)";
pub const RELEASE_LOCKUP: &str = "releaseLockup(address,uint256)";
pub const CLEAR_EXPIRED_LOCKUP: &str = "clearExpiredLockup(address)";
pub const TRANSFER: &str = "transfer(address,uint256)";
pub const BURN: &str = "burn(uint256)";

// Handle on the managed token contract, bound to one provider
#[derive(Clone)]
pub struct TokenContract {
    api: WalletApi,
    address: Address,
    receipt_poll_interval: Duration,
}

impl TokenContract {
    pub fn new(api: WalletApi, address: Address, receipt_poll_interval: Duration) -> Self {
        Self {
            api,
            address,
            receipt_poll_interval,
        }
    }

    pub fn api(&self) -> &WalletApi {
        &self.api
    }

    async fn read(&self, call: ContractCall) -> Result<Vec<u8>, AdminError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("read {}", call.signature());
        }
        let request = TransactionRequest::call(self.address, to_hex_data(&call.data()));
        self.api.call(&request).await
    }

    async fn read_no_args(&self, signature: &'static str) -> Result<Vec<u8>, AdminError> {
        self.read(ContractCall::new(signature, Vec::new())).await
    }

    async fn read_for(&self, signature: &'static str, account: &Address) -> Result<Vec<u8>, AdminError> {
        self.read(ContractCall::new(signature, vec![Token::Address(*account)])).await
    }

    pub async fn name(&self) -> Result<String, AdminError> {
        Ok(abi::decode_string(&self.read_no_args(NAME).await?, 0)?)
    }

    pub async fn symbol(&self) -> Result<String, AdminError> {
        Ok(abi::decode_string(&self.read_no_args(SYMBOL).await?, 0)?)
    }

    pub async fn decimals(&self) -> Result<u8, AdminError> {
        Ok(abi::decode_u8(&self.read_no_args(DECIMALS).await?, 0)?)
    }

    pub async fn total_supply(&self) -> Result<U256, AdminError> {
        Ok(abi::decode_uint(&self.read_no_args(TOTAL_SUPPLY).await?, 0)?)
    }

    pub async fn paused(&self) -> Result<bool, AdminError> {
        Ok(abi::decode_bool(&self.read_no_args(PAUSED).await?, 0)?)
    }

    pub async fn owner(&self) -> Result<Address, AdminError> {
        Ok(abi::decode_address(&self.read_no_args(OWNER).await?, 0)?)
    }

    pub async fn balance_of(&self, account: &Address) -> Result<U256, AdminError> {
        Ok(abi::decode_uint(&self.read_for(BALANCE_OF, account).await?, 0)?)
    }

    pub async fn unlocked_balance_of(&self, account: &Address) -> Result<U256, AdminError> {
        Ok(abi::decode_uint(&self.read_for(UNLOCKED_BALANCE_OF, account).await?, 0)?)
    }

    pub async fn locked_balance(&self, account: &Address) -> Result<U256, AdminError> {
        Ok(abi::decode_uint(&self.read_for(LOCKED_BALANCE, account).await?, 0)?)
    }

    // Returns (locked, remainingSeconds, expiration)
    pub async fn locked_info(&self, account: &Address) -> Result<LockupRecord, AdminError> {
        let data = self.read_for(LOCKED_INFO, account).await?;
        Ok(LockupRecord {
            locked: abi::decode_uint(&data, 0)?,
            remaining_seconds: abi::decode_u64(&data, 1)?,
            expiration: abi::decode_u64(&data, 2)?,
        })
    }

    // Estimate, send with the inflated gas limit, then wait for the receipt.
    // A mined but reverted transaction is an error.
    pub async fn submit(&self, from: &Address, call: &ContractCall) -> Result<TransactionReceipt, AdminError> {
        let request = TransactionRequest::transaction(*from, self.address, to_hex_data(&call.data()));
        let estimate = self.api.estimate_gas(&request).await?;
        let gas_limit = apply_gas_margin(estimate);
        if log::log_enabled!(log::Level::Debug) {
            debug!("{}: gas estimate {}, limit {}", call.signature(), estimate, gas_limit);
        }

        let request = request.with_gas(to_quantity(gas_limit));
        let hash = self.api.send_transaction(&request).await?;
        info!("{} sent in transaction {}", call.signature(), hash);

        let receipt = self.wait_for_receipt(&hash).await?;
        if !receipt.is_success() {
            return Err(AdminError::TransactionReverted(hash));
        }

        info!("Transaction {} confirmed", hash);
        Ok(receipt)
    }

    // No timeout: a transaction that never gets mined keeps the caller waiting
    async fn wait_for_receipt(&self, hash: &str) -> Result<TransactionReceipt, AdminError> {
        loop {
            if let Some(receipt) = self.api.get_transaction_receipt(hash).await? {
                return Ok(receipt);
            }

            if log::log_enabled!(log::Level::Trace) {
                trace!("Transaction {} is still pending", hash);
            }
            sleep(self.receipt_poll_interval).await;
        }
    }
}
