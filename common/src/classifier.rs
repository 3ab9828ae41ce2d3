// Translate wallet / node / contract failures into operator-facing messages.
//
// Classification is an ordered list of rules; the first rule that recognizes
// the error decides its kind. Every rule is a plain function so it can be
// tested on its own.

use crate::{
    i18n::{Locale, Text},
    rpc::{ErrorCode, ProviderError, CALL_EXCEPTION, INSUFFICIENT_FUNDS, UNPREDICTABLE_GAS_LIMIT},
};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{Display, Formatter};

lazy_static! {
    // Empty or undecodable results: wrong network, no code at the address, or a lagging node
    static ref NODE_SYNC_PATTERN: Regex = Regex::new(
        r"(?i)Returned values aren't valid|did it run Out of Gas|not using the correct ABI|requesting data from a block number that does not exist|node which is not fully synced"
    ).unwrap();
    static ref CALL_FAILED_PATTERN: Regex = Regex::new(r"(?i)execution reverted|call exception|contract call failed").unwrap();
    static ref INSUFFICIENT_FUNDS_PATTERN: Regex = Regex::new(r"(?i)insufficient funds").unwrap();
    static ref NONCE_TOO_LOW_PATTERN: Regex = Regex::new(r"(?i)nonce too low").unwrap();
    static ref REPLACEMENT_PATTERN: Regex = Regex::new(r"(?i)replacement (transaction )?(fee|underpriced)").unwrap();
    static ref GAS_ESTIMATION_PATTERN: Regex = Regex::new(r"(?i)gas required exceeds allowance|always failing transaction").unwrap();
    static ref INVALID_ADDRESS_PATTERN: Regex = Regex::new(r"(?i)invalid address").unwrap();
    static ref INVALID_NUMBER_PATTERN: Regex = Regex::new(r"(?i)invalid (bignumber|number|uint)").unwrap();
    static ref REVERT_PATTERN: Regex = Regex::new(r"(?i)call exception|execution reverted|reverted with reason string").unwrap();
    static ref REVERT_REASON_PATTERN: Regex = Regex::new(r#"(?i)reverted with reason string ['"]([^'"]+)['"]"#).unwrap();
    static ref CHAIN_PATTERN: Regex = Regex::new(r"(?i)network error|chain|wrong network|unsupported chain id").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    UserCancelled,
    NetworkMismatch,
    ContractCallFailed,
    InsufficientFunds,
    NonceTooLow,
    ReplacementUnderpriced,
    GasEstimationFailed,
    InvalidAddress,
    InvalidAmount,
    Reverted(Option<String>),
    ChainError,
    Unknown(Option<String>),
}

impl ErrorKind {
    pub fn message(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.english(),
            Locale::Ko => self.korean(),
        }
    }

    fn english(&self) -> String {
        match self {
            ErrorKind::UserCancelled => "Transaction cancelled.".to_owned(),
            ErrorKind::NetworkMismatch => "The contract could not be found on the selected network. Make sure the correct network (BSC Mainnet) is selected.".to_owned(),
            ErrorKind::ContractCallFailed => "Contract call failed. Check the network connection and the contract address.".to_owned(),
            ErrorKind::InsufficientFunds => "Insufficient wallet balance.".to_owned(),
            ErrorKind::NonceTooLow => "Nonce too low. Refresh the wallet or try again shortly.".to_owned(),
            ErrorKind::ReplacementUnderpriced => "Replacement transaction fee too low. Raise the gas price or limit and retry.".to_owned(),
            ErrorKind::GasEstimationFailed => "Gas estimation failed. Check the inputs, permissions and contract state.".to_owned(),
            ErrorKind::InvalidAddress => "Invalid address format.".to_owned(),
            ErrorKind::InvalidAmount => "Invalid number format.".to_owned(),
            ErrorKind::Reverted(reason) => with_reason("Contract execution was reverted", reason),
            ErrorKind::ChainError => "Network error. Make sure the correct network is selected.".to_owned(),
            ErrorKind::Unknown(Some(message)) => format!("Error: {}", message),
            ErrorKind::Unknown(None) => Text::UnknownError.get(Locale::En).to_owned(),
        }
    }

    fn korean(&self) -> String {
        match self {
            ErrorKind::UserCancelled => "트랜잭션을 취소하였습니다.".to_owned(),
            ErrorKind::NetworkMismatch => "선택된 네트워크에서 컨트랙트를 찾을 수 없습니다. 상단에서 올바른 네트워크(BSC Mainnet)를 선택했는지 확인해주세요.".to_owned(),
            ErrorKind::ContractCallFailed => "컨트랙트 호출에 실패했습니다. 네트워크 연결 상태와 컨트랙트 주소를 확인해주세요.".to_owned(),
            ErrorKind::InsufficientFunds => "지갑 잔액이 부족합니다.".to_owned(),
            ErrorKind::NonceTooLow => "논스가 낮습니다. 지갑을 새로고침하거나 잠시 후 다시 시도해주세요.".to_owned(),
            ErrorKind::ReplacementUnderpriced => "대체 트랜잭션 수수료가 낮습니다. 가스 가격/한도를 높여 재시도하세요.".to_owned(),
            ErrorKind::GasEstimationFailed => "가스 추정에 실패했습니다. 입력값, 권한, 컨트랙트 상태를 확인해주세요.".to_owned(),
            ErrorKind::InvalidAddress => "잘못된 주소 형식입니다.".to_owned(),
            ErrorKind::InvalidAmount => "숫자 형식이 올바르지 않습니다.".to_owned(),
            ErrorKind::Reverted(reason) => with_reason("컨트랙트 실행이 거부(revert)되었습니다", reason),
            ErrorKind::ChainError => "네트워크 오류입니다. 상단에서 올바른 네트워크를 선택했는지 확인하세요.".to_owned(),
            ErrorKind::Unknown(Some(message)) => format!("오류: {}", message),
            ErrorKind::Unknown(None) => Text::UnknownError.get(Locale::Ko).to_owned(),
        }
    }

    // The contract is unreachable on this network, as opposed to any other failure
    pub fn is_network_mismatch(&self) -> bool {
        matches!(self, ErrorKind::NetworkMismatch)
    }
}

fn with_reason(prefix: &str, reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!("{}: {}", prefix, reason),
        None => prefix.to_owned(),
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message(Locale::En))
    }
}

// What the rules look at
pub struct ErrorView<'a> {
    code: Option<&'a ErrorCode>,
    // top level message only, as rejection texts live there
    top_message: &'a str,
    // most specific message available
    message: &'a str,
}

impl<'a> ErrorView<'a> {
    pub fn new(error: &'a ProviderError) -> Self {
        Self {
            code: error.code(),
            top_message: error.message.as_deref().unwrap_or_default(),
            message: error.best_message().unwrap_or_default(),
        }
    }

    fn code_is(&self, code: i64) -> bool {
        self.code.is_some_and(|c| c.is(code))
    }

    fn code_is_symbol(&self, symbol: &str) -> bool {
        self.code.is_some_and(|c| c.is_symbol(symbol))
    }
}

pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&ErrorView) -> Option<ErrorKind>,
}

pub static RULES: &[Rule] = &[
    Rule { name: "user_rejected", apply: user_rejected },
    Rule { name: "node_sync", apply: node_sync },
    Rule { name: "call_failed", apply: call_failed },
    Rule { name: "insufficient_funds", apply: insufficient_funds },
    Rule { name: "nonce_too_low", apply: nonce_too_low },
    Rule { name: "replacement_underpriced", apply: replacement_underpriced },
    Rule { name: "gas_estimation", apply: gas_estimation },
    Rule { name: "invalid_address", apply: invalid_address },
    Rule { name: "invalid_number", apply: invalid_number },
    Rule { name: "reverted", apply: reverted },
    Rule { name: "chain_error", apply: chain_error },
];

fn when(matched: bool, kind: ErrorKind) -> Option<ErrorKind> {
    if matched {
        Some(kind)
    } else {
        None
    }
}

pub fn user_rejected(view: &ErrorView) -> Option<ErrorKind> {
    let matched = view.code_is(crate::rpc::USER_REJECTED_REQUEST)
        || view.code_is_symbol(crate::rpc::ACTION_REJECTED)
        || view.top_message.to_lowercase().contains("user rejected");
    when(matched, ErrorKind::UserCancelled)
}

pub fn node_sync(view: &ErrorView) -> Option<ErrorKind> {
    when(NODE_SYNC_PATTERN.is_match(view.message), ErrorKind::NetworkMismatch)
}

pub fn call_failed(view: &ErrorView) -> Option<ErrorKind> {
    when(CALL_FAILED_PATTERN.is_match(view.message), ErrorKind::ContractCallFailed)
}

pub fn insufficient_funds(view: &ErrorView) -> Option<ErrorKind> {
    let matched = INSUFFICIENT_FUNDS_PATTERN.is_match(view.message) || view.code_is_symbol(INSUFFICIENT_FUNDS);
    when(matched, ErrorKind::InsufficientFunds)
}

pub fn nonce_too_low(view: &ErrorView) -> Option<ErrorKind> {
    when(NONCE_TOO_LOW_PATTERN.is_match(view.message), ErrorKind::NonceTooLow)
}

pub fn replacement_underpriced(view: &ErrorView) -> Option<ErrorKind> {
    when(REPLACEMENT_PATTERN.is_match(view.message), ErrorKind::ReplacementUnderpriced)
}

pub fn gas_estimation(view: &ErrorView) -> Option<ErrorKind> {
    let matched = view.code_is_symbol(UNPREDICTABLE_GAS_LIMIT) || GAS_ESTIMATION_PATTERN.is_match(view.message);
    when(matched, ErrorKind::GasEstimationFailed)
}

pub fn invalid_address(view: &ErrorView) -> Option<ErrorKind> {
    when(INVALID_ADDRESS_PATTERN.is_match(view.message), ErrorKind::InvalidAddress)
}

pub fn invalid_number(view: &ErrorView) -> Option<ErrorKind> {
    when(INVALID_NUMBER_PATTERN.is_match(view.message), ErrorKind::InvalidAmount)
}

pub fn reverted(view: &ErrorView) -> Option<ErrorKind> {
    if !view.code_is_symbol(CALL_EXCEPTION) && !REVERT_PATTERN.is_match(view.message) {
        return None;
    }

    Some(ErrorKind::Reverted(revert_reason(view.message)))
}

pub fn chain_error(view: &ErrorView) -> Option<ErrorKind> {
    when(CHAIN_PATTERN.is_match(view.message), ErrorKind::ChainError)
}

// Extract X from `reverted with reason string 'X'`
pub fn revert_reason(message: &str) -> Option<String> {
    REVERT_REASON_PATTERN
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_owned())
}

pub fn classify(error: &ProviderError) -> ErrorKind {
    let view = ErrorView::new(error);
    RULES
        .iter()
        .find_map(|rule| (rule.apply)(&view))
        .unwrap_or_else(|| {
            if view.message.is_empty() {
                ErrorKind::Unknown(None)
            } else {
                ErrorKind::Unknown(Some(view.message.to_owned()))
            }
        })
}

pub fn friendly_error(error: &ProviderError, locale: Locale) -> String {
    classify(error).message(locale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::{USER_REJECTED_REQUEST, ACTION_REJECTED};

    fn msg(message: &str) -> ProviderError {
        ProviderError::message(message)
    }

    #[test]
    fn test_user_rejection_wins_over_message() {
        let err = ProviderError::new(USER_REJECTED_REQUEST, "insufficient funds for gas * price + value");
        assert_eq!(classify(&err), ErrorKind::UserCancelled);
        assert_eq!(friendly_error(&err, Locale::En), "Transaction cancelled.");

        let err = ProviderError::new(USER_REJECTED_REQUEST, "execution reverted: reverted with reason string 'x'")
            .with_data_message("nonce too low");
        assert_eq!(friendly_error(&err, Locale::Ko), "트랜잭션을 취소하였습니다.");

        assert_eq!(classify(&ProviderError::symbolic(ACTION_REJECTED, "")), ErrorKind::UserCancelled);
        assert_eq!(classify(&msg("MetaMask: User rejected the request.")), ErrorKind::UserCancelled);
    }

    #[test]
    fn test_each_rule() {
        let cases = [
            ("Returned values aren't valid, did it run Out of Gas?", ErrorKind::NetworkMismatch),
            ("header not found: requesting data from a block number that does not exist", ErrorKind::NetworkMismatch),
            ("execution reverted", ErrorKind::ContractCallFailed),
            ("call exception", ErrorKind::ContractCallFailed),
            ("insufficient funds for gas * price + value", ErrorKind::InsufficientFunds),
            ("nonce too low", ErrorKind::NonceTooLow),
            ("replacement transaction underpriced", ErrorKind::ReplacementUnderpriced),
            ("replacement fee too low", ErrorKind::ReplacementUnderpriced),
            ("gas required exceeds allowance (30000000)", ErrorKind::GasEstimationFailed),
            ("always failing transaction", ErrorKind::GasEstimationFailed),
            ("invalid address", ErrorKind::InvalidAddress),
            ("invalid BigNumber string", ErrorKind::InvalidAmount),
            ("invalid uint", ErrorKind::InvalidAmount),
            ("unsupported chain id", ErrorKind::ChainError),
            ("network error: connection refused", ErrorKind::ChainError),
        ];

        for (message, expected) in cases {
            assert_eq!(classify(&msg(message)), expected, "message: {}", message);
        }
    }

    #[test]
    fn test_symbolic_codes() {
        assert_eq!(
            classify(&ProviderError::symbolic(INSUFFICIENT_FUNDS, "not enough")),
            ErrorKind::InsufficientFunds
        );
        assert_eq!(
            classify(&ProviderError::symbolic(UNPREDICTABLE_GAS_LIMIT, "cannot estimate")),
            ErrorKind::GasEstimationFailed
        );
        assert_eq!(
            classify(&ProviderError::symbolic(CALL_EXCEPTION, "missing revert data")),
            ErrorKind::Reverted(None)
        );
    }

    #[test]
    fn test_revert_reason() {
        let err = ProviderError::symbolic(
            CALL_EXCEPTION,
            "VM Exception while processing transaction: reverted with reason string \"Ownable: caller is not the owner\"",
        );
        let message = friendly_error(&err, Locale::En);
        assert!(message.ends_with(": Ownable: caller is not the owner"), "{}", message);

        let err = msg("Error: VM Exception while processing transaction: reverted with reason string 'Lockup: expired'");
        assert_eq!(classify(&err), ErrorKind::Reverted(Some("Lockup: expired".to_owned())));

        let err = ProviderError::symbolic(CALL_EXCEPTION, "transaction reverted");
        let message = friendly_error(&err, Locale::En);
        assert_eq!(message, "Contract execution was reverted");
        assert!(!message.contains(':'));
    }

    #[test]
    fn test_rule_order() {
        // node sync is checked before the generic call failure
        let err = msg("execution reverted: Returned values aren't valid");
        assert_eq!(classify(&err), ErrorKind::NetworkMismatch);
        // call failure before insufficient funds
        let err = msg("execution reverted: insufficient funds");
        assert_eq!(classify(&err), ErrorKind::ContractCallFailed);
        assert_eq!(RULES.first().map(|r| r.name), Some("user_rejected"));
        assert_eq!(RULES.last().map(|r| r.name), Some("chain_error"));
    }

    #[test]
    fn test_nested_message_preferred() {
        let err = ProviderError::new(-32603, "Internal JSON-RPC error.")
            .with_data_message("nonce too low");
        assert_eq!(classify(&err), ErrorKind::NonceTooLow);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(friendly_error(&msg("something odd"), Locale::En), "Error: something odd");
        assert_eq!(friendly_error(&msg("something odd"), Locale::Ko), "오류: something odd");
        assert_eq!(friendly_error(&ProviderError::default(), Locale::En), "An unknown error occurred.");
    }
}
