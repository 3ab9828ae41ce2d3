use crate::address::Address;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use strum::{EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

// Metadata handed to the wallet when it has to register the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainParams {
    pub chain_id: u64,
    pub chain_name: &'static str,
    pub native_currency: NativeCurrency,
    pub rpc_urls: &'static [&'static str],
    pub block_explorer_urls: &'static [&'static str],
}

pub const BSC_MAINNET: ChainParams = ChainParams {
    chain_id: 56,
    chain_name: "BNB Smart Chain Mainnet",
    native_currency: NativeCurrency {
        name: "BNB",
        symbol: "BNB",
        decimals: 18,
    },
    rpc_urls: &["https://bsc-dataseed1.binance.org"],
    block_explorer_urls: &["https://bscscan.com"],
};

// Payload of `wallet_addEthereumChain`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEthereumChainParameter {
    pub chain_id: String,
    pub chain_name: &'static str,
    pub native_currency: NativeCurrency,
    pub rpc_urls: &'static [&'static str],
    pub block_explorer_urls: &'static [&'static str],
}

// Payload of `wallet_switchEthereumChain`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchEthereumChainParameter {
    pub chain_id: String,
}

impl ChainParams {
    pub fn chain_id_hex(&self) -> String {
        format_chain_id(self.chain_id)
    }

    pub fn explorer_base(&self) -> &'static str {
        self.block_explorer_urls.first().copied().unwrap_or_default()
    }

    pub fn add_chain_parameter(&self) -> AddEthereumChainParameter {
        AddEthereumChainParameter {
            chain_id: self.chain_id_hex(),
            chain_name: self.chain_name,
            native_currency: self.native_currency,
            rpc_urls: self.rpc_urls,
            block_explorer_urls: self.block_explorer_urls,
        }
    }

    pub fn switch_chain_parameter(&self) -> SwitchEthereumChainParameter {
        SwitchEthereumChainParameter {
            chain_id: self.chain_id_hex(),
        }
    }
}

// Networks selectable by the operator
// Only one is supported: the contract is deployed on BSC mainnet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    #[default]
    BscMainnet,
}

impl Network {
    pub fn params(&self) -> &'static ChainParams {
        match self {
            Network::BscMainnet => &BSC_MAINNET,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.params().chain_id
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Network> {
        Network::iter().find(|network| network.chain_id() == chain_id)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.params().chain_name)
    }
}

pub fn format_chain_id(chain_id: u64) -> String {
    format!("{:#x}", chain_id)
}

// Wallets answer `eth_chainId` with a hex quantity, some older ones with a decimal
pub fn parse_chain_id(value: &str) -> Option<u64> {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

// Explorer pages for the managed contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorerLinks {
    pub contract: String,
    pub token_tracker: String,
    pub holders: String,
}

impl ExplorerLinks {
    pub fn new(explorer_base: &str, contract: &Address) -> Self {
        let base = explorer_base.trim_end_matches('/');
        let contract = contract.to_checksum();
        Self {
            contract: format!("{}/address/{}", base, contract),
            token_tracker: format!("{}/token/{}", base, contract),
            holders: format!("{}/token/{}#balances", base, contract),
        }
    }
}
