use crate::dispatcher::Action;
use gpmf_common::{
    abi::AbiError,
    classifier::{classify, ErrorKind},
    i18n::{self, Locale, Text},
    rpc::ProviderError,
    validation::ValidationError,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("No wallet provider is configured")]
    ProviderMissing,
    #[error("Owner role is required")]
    OwnerRequired,
    #[error("Wallet returned no accounts")]
    NoAccounts,
    #[error("Unsupported network id {}", _0)]
    UnsupportedNetwork(u64),
    #[error("{} is already in progress", _0)]
    InFlight(Action),
    #[error("Invalid chain id returned by wallet: {}", _0)]
    InvalidChainId(String),
    #[error("Invalid response for {}: {}", _0, _1)]
    InvalidResponse(&'static str, String),
    #[error("Transaction {} was reverted", _0)]
    TransactionReverted(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Abi(#[from] AbiError),
}

impl AdminError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminError::Provider(e) => classify(e),
            // Undecodable return data reads like any other node answer
            AdminError::Abi(e) => classify(&ProviderError::message(e.to_string())),
            AdminError::Validation(e) if e.is_address() => ErrorKind::InvalidAddress,
            AdminError::Validation(_) => ErrorKind::InvalidAmount,
            AdminError::TransactionReverted(_) => ErrorKind::Reverted(None),
            AdminError::UnsupportedNetwork(_) | AdminError::InvalidChainId(_) => ErrorKind::ChainError,
            other => ErrorKind::Unknown(Some(other.to_string())),
        }
    }

    // Text shown to the operator for this failure
    pub fn friendly(&self, locale: Locale) -> String {
        match self {
            AdminError::ProviderMissing => Text::InstallWallet.get(locale).to_owned(),
            AdminError::OwnerRequired => Text::OwnerRequired.get(locale).to_owned(),
            AdminError::InFlight(_) => Text::ActionInProgress.get(locale).to_owned(),
            AdminError::UnsupportedNetwork(_) => Text::UnsupportedNetwork.get(locale).to_owned(),
            AdminError::NoAccounts => Text::WalletConnectionFailed.get(locale).to_owned(),
            AdminError::Validation(ValidationError::InvalidInteger(_, min)) => i18n::integer_required(locale, *min),
            AdminError::Validation(ValidationError::AmountOutOfRange { min, max, .. }) => {
                i18n::amount_out_of_range(locale, *min, *max)
            }
            other => other.kind().message(locale),
        }
    }

    pub fn is_network_mismatch(&self) -> bool {
        self.kind().is_network_mismatch()
    }

    pub fn is_user_rejected(&self) -> bool {
        matches!(self.kind(), ErrorKind::UserCancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpmf_common::rpc::USER_REJECTED_REQUEST;

    #[test]
    fn test_friendly_messages() {
        let err = AdminError::from(ProviderError::new(USER_REJECTED_REQUEST, "User denied"));
        assert_eq!(err.friendly(Locale::En), "Transaction cancelled.");
        assert!(err.is_user_rejected());

        assert_eq!(AdminError::OwnerRequired.friendly(Locale::En), "Owner role is required.");
        assert_eq!(
            AdminError::from(ValidationError::InvalidAddress("0x12".to_owned())).friendly(Locale::En),
            "Invalid address format."
        );
        assert_eq!(
            AdminError::from(ValidationError::InvalidInteger("0".to_owned(), 1)).friendly(Locale::En),
            "Must be a whole number of at least 1."
        );
    }

    #[test]
    fn test_abi_error_is_network_mismatch() {
        assert!(AdminError::from(AbiError::EmptyData).is_network_mismatch());
        assert!(!AdminError::TransactionReverted("0xabc".to_owned()).is_network_mismatch());
    }
}
