use crate::{
    contract::TokenContract,
    error::AdminError,
    provider::SharedProvider,
    wallet_api::WalletApi,
};
use gpmf_common::{
    address::Address,
    chain::{ExplorerLinks, Network},
};
use log::{debug, info, trace};
use std::time::Duration;

// Everything bound to the chain the wallet is currently on.
// Rebuilt after every switch and never reused across chains.
#[derive(Clone)]
pub struct Handles {
    pub api: WalletApi,
    pub contract: TokenContract,
    pub links: ExplorerLinks,
    pub network: Network,
}

impl Handles {
    pub fn chain_id(&self) -> u64 {
        self.network.chain_id()
    }
}

pub struct NetworkManager {
    provider: Option<SharedProvider>,
    contract_address: Address,
    receipt_poll_interval: Duration,
}

impl NetworkManager {
    pub fn new(provider: Option<SharedProvider>, contract_address: Address, receipt_poll_interval: Duration) -> Self {
        Self {
            provider,
            contract_address,
            receipt_poll_interval,
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn contract_address(&self) -> &Address {
        &self.contract_address
    }

    fn provider(&self) -> Result<&SharedProvider, AdminError> {
        self.provider.as_ref().ok_or(AdminError::ProviderMissing)
    }

    // Map a selector value to a supported network
    pub fn resolve(&self, chain_id: u64) -> Result<Network, AdminError> {
        Network::from_chain_id(chain_id).ok_or(AdminError::UnsupportedNetwork(chain_id))
    }

    pub fn build_handles(&self, network: Network) -> Result<Handles, AdminError> {
        let api = WalletApi::new(self.provider()?.clone());
        let contract = TokenContract::new(api.clone(), self.contract_address, self.receipt_poll_interval);
        let links = ExplorerLinks::new(network.params().explorer_base(), &self.contract_address);
        Ok(Handles {
            api,
            contract,
            links,
            network,
        })
    }

    // Make the wallet use the network, registering it first if the wallet does not know it
    pub async fn switch_to(&self, network: Network) -> Result<Handles, AdminError> {
        let api = WalletApi::new(self.provider()?.clone());
        let params = network.params();
        let current = api.chain_id().await?;
        if log::log_enabled!(log::Level::Trace) {
            trace!("wallet is on chain {}, target is {}", current, params.chain_id);
        }

        if current != params.chain_id {
            match api.switch_chain(params).await {
                Ok(()) => {}
                Err(AdminError::Provider(e)) if e.is_unrecognized_chain() => {
                    info!("Wallet does not know {}, registering it", network);
                    api.add_chain(params).await?;
                    api.switch_chain(params).await?;
                }
                Err(e) => return Err(e),
            }
            info!("Switched wallet from chain {} to {}", current, params.chain_id);
        }

        // handles created before the switch are stale
        self.build_handles(network)
    }

    // First account the wallet exposes
    pub async fn request_account(&self, handles: &Handles) -> Result<Address, AdminError> {
        let accounts = handles.api.request_accounts().await?;
        if log::log_enabled!(log::Level::Debug) {
            debug!("Wallet exposed {} account(s)", accounts.len());
        }
        accounts.into_iter().next().ok_or(AdminError::NoAccounts)
    }
}
