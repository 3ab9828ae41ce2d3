use gpmf_common::address::Address;

// A connected wallet on the target chain.
// Created by connect, dropped on disconnect; a chain switch rebuilds it
// so no handle outlives the chain it was created for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    wallet_address: Address,
    chain_id: u64,
    is_owner: bool,
}

impl Session {
    // Role is unknown until checked, start unprivileged
    pub fn new(wallet_address: Address, chain_id: u64) -> Self {
        Self {
            wallet_address,
            chain_id,
            is_owner: false,
        }
    }

    pub fn wallet_address(&self) -> &Address {
        &self.wallet_address
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn is_owner(&self) -> bool {
        self.is_owner
    }

    // Compare against the contract owner; `Address` equality ignores hex case
    pub fn set_owner(&mut self, owner: &Address) -> bool {
        self.is_owner = self.wallet_address == *owner;
        self.is_owner
    }

    pub fn revoke_owner(&mut self) {
        self.is_owner = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_check_ignores_case() {
        let wallet: Address = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd".parse().unwrap();
        let owner: Address = "0xABCDEFABCDEFABCDEFABCDEFABCDEFABCDEFABCD".parse().unwrap();
        let mut session = Session::new(wallet, 56);
        assert!(!session.is_owner());
        assert!(session.set_owner(&owner));

        session.revoke_owner();
        assert!(!session.is_owner());
        assert!(!session.set_owner(&Address::zero()));
    }
}
