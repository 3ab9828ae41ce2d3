mod error;
mod types;

pub use error::*;
pub use types::*;

pub const JSON_RPC_VERSION: &str = "2.0";

// Wallet / node methods used by the panel
pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
pub const ETH_ACCOUNTS: &str = "eth_accounts";
pub const ETH_CHAIN_ID: &str = "eth_chainId";
pub const ETH_GET_BALANCE: &str = "eth_getBalance";
pub const ETH_CALL: &str = "eth_call";
pub const ETH_ESTIMATE_GAS: &str = "eth_estimateGas";
pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";
pub const ETH_GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
pub const WALLET_SWITCH_ETHEREUM_CHAIN: &str = "wallet_switchEthereumChain";
pub const WALLET_ADD_ETHEREUM_CHAIN: &str = "wallet_addEthereumChain";

pub const LATEST_BLOCK: &str = "latest";
