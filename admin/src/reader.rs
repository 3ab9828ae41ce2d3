use crate::{contract::TokenContract, error::AdminError};
use futures::{join, try_join};
use gpmf_common::{
    address::Address,
    lockup::{BalanceBreakdown, LockupRecord},
    token::ContractSnapshot,
};
use log::{trace, warn};
use primitive_types::U256;

// Result of one wallet refresh; every read stands on its own
#[derive(Debug)]
pub struct WalletReadout {
    pub native_balance: Result<U256, AdminError>,
    pub token_balance: Result<U256, AdminError>,
    pub is_owner: Result<bool, AdminError>,
}

pub struct StateReader<'a> {
    contract: &'a TokenContract,
}

impl<'a> StateReader<'a> {
    pub fn new(contract: &'a TokenContract) -> Self {
        Self { contract }
    }

    // Native balance, token balance and role, concurrently.
    // A failing read does not cancel its siblings.
    pub async fn read_wallet(&self, wallet: &Address) -> WalletReadout {
        if log::log_enabled!(log::Level::Trace) {
            trace!("read_wallet {}", wallet);
        }

        let (native_balance, token_balance, is_owner) = join!(
            self.contract.api().get_balance(wallet),
            self.contract.balance_of(wallet),
            self.role_check(wallet)
        );

        for (read, result) in [
            ("native balance", native_balance.as_ref().err()),
            ("token balance", token_balance.as_ref().err()),
            ("role", is_owner.as_ref().err()),
        ] {
            if let Some(e) = result {
                warn!("Error while reading {} of {}: {}", read, wallet, e);
            }
        }

        WalletReadout {
            native_balance,
            token_balance,
            is_owner,
        }
    }

    // All or nothing: a partial snapshot is never returned
    pub async fn load_contract_snapshot(&self) -> Result<ContractSnapshot, AdminError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("load_contract_snapshot");
        }

        let (name, symbol, decimals, total_supply, paused, owner) = try_join!(
            self.contract.name(),
            self.contract.symbol(),
            self.contract.decimals(),
            self.contract.total_supply(),
            self.contract.paused(),
            self.contract.owner()
        )?;

        Ok(ContractSnapshot {
            name,
            symbol,
            decimals,
            total_supply,
            paused,
            owner,
        })
    }

    pub async fn role_check(&self, wallet: &Address) -> Result<bool, AdminError> {
        let owner = self.contract.owner().await?;
        Ok(owner == *wallet)
    }

    pub async fn lookup_lockup(&self, account: &Address) -> Result<LockupRecord, AdminError> {
        self.contract.locked_info(account).await
    }

    pub async fn lookup_unlocked_balance(&self, account: &Address) -> Result<BalanceBreakdown, AdminError> {
        let (unlocked, total, locked) = try_join!(
            self.contract.unlocked_balance_of(account),
            self.contract.balance_of(account),
            self.contract.locked_balance(account)
        )?;

        Ok(BalanceBreakdown {
            total,
            locked,
            unlocked,
        })
    }

    pub async fn balance_of(&self, account: &Address) -> Result<U256, AdminError> {
        self.contract.balance_of(account).await
    }

    // Single harmless read telling whether the contract answers on this network
    pub async fn probe(&self) -> Result<(), AdminError> {
        self.contract.name().await.map(|_| ())
    }
}
