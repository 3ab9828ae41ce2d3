use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

// EIP-1193 provider error codes
pub const USER_REJECTED_REQUEST: i64 = 4001;
pub const UNSUPPORTED_METHOD: i64 = 4200;
// Returned by `wallet_switchEthereumChain` when the wallet does not know the chain
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

// JSON-RPC 2.0 errors
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INTERNAL_ERROR: i64 = -32603;

// Symbolic codes some wallet libraries attach instead of numbers
pub const ACTION_REJECTED: &str = "ACTION_REJECTED";
pub const INSUFFICIENT_FUNDS: &str = "INSUFFICIENT_FUNDS";
pub const UNPREDICTABLE_GAS_LIMIT: &str = "UNPREDICTABLE_GAS_LIMIT";
pub const CALL_EXCEPTION: &str = "CALL_EXCEPTION";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Numeric(i64),
    Symbolic(String),
}

impl ErrorCode {
    pub fn is(&self, code: i64) -> bool {
        matches!(self, ErrorCode::Numeric(c) if *c == code)
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        matches!(self, ErrorCode::Symbolic(s) if s == symbol)
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::Numeric(code) => write!(f, "{}", code),
            ErrorCode::Symbolic(code) => write!(f, "{}", code),
        }
    }
}

// Anything a wallet, node or transport rejected a request with.
// Providers disagree on where the useful text lives, so every known spot is kept:
// the top level message, `data.message` and a nested `error.message`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderError {
    pub code: Option<ErrorCode>,
    pub message: Option<String>,
    pub data_message: Option<String>,
    pub inner_message: Option<String>,
    pub data: Option<Value>,
}

impl ProviderError {
    pub fn new<S: Into<String>>(code: i64, message: S) -> Self {
        Self {
            code: Some(ErrorCode::Numeric(code)),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn symbolic<S: Into<String>>(code: &str, message: S) -> Self {
        Self {
            code: Some(ErrorCode::Symbolic(code.to_owned())),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn message<S: Into<String>>(message: S) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    // Failure below the JSON-RPC layer (connection refused, bad body...)
    pub fn transport<E: Display>(error: E) -> Self {
        Self::message(format!("network error: {}", error))
    }

    pub fn with_data_message<S: Into<String>>(mut self, message: S) -> Self {
        self.data_message = Some(message.into());
        self
    }

    // Build from any JSON error shape: a JSON-RPC error object,
    // a wallet library error with a nested `error`, or a bare string
    pub fn from_json(value: &Value) -> Self {
        let object = match value {
            Value::Object(object) => object,
            Value::String(message) => return Self::message(message.clone()),
            Value::Null => return Self::default(),
            other => return Self::message(other.to_string()),
        };

        let code = match object.get("code") {
            Some(Value::Number(n)) => n.as_i64().map(ErrorCode::Numeric),
            Some(Value::String(s)) => Some(ErrorCode::Symbolic(s.clone())),
            _ => None,
        };

        let text = |v: Option<&Value>| v.and_then(Value::as_str).map(str::to_owned);
        let message = text(object.get("message"));
        let data = object.get("data").cloned();
        let data_message = data.as_ref().and_then(|d| text(d.get("message")));
        let inner = object.get("error");
        let inner_message = inner.and_then(|e| text(e.get("message")));

        // A nested error may carry the only code there is
        let code = code.or_else(|| {
            inner
                .and_then(|e| e.get("code"))
                .and_then(Value::as_i64)
                .map(ErrorCode::Numeric)
        });

        Self {
            code,
            message,
            data_message,
            inner_message,
            data,
        }
    }

    pub fn code(&self) -> Option<&ErrorCode> {
        self.code.as_ref()
    }

    pub fn has_code(&self, code: i64) -> bool {
        self.code.as_ref().is_some_and(|c| c.is(code))
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.code.as_ref().is_some_and(|c| c.is_symbol(symbol))
    }

    pub fn is_user_rejected(&self) -> bool {
        self.has_code(USER_REJECTED_REQUEST) || self.has_symbol(ACTION_REJECTED)
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.has_code(UNRECOGNIZED_CHAIN)
    }

    pub fn is_method_not_found(&self) -> bool {
        self.has_code(METHOD_NOT_FOUND) || self.has_code(UNSUPPORTED_METHOD)
    }

    // Most specific text available: data.message, then error.message, then message
    pub fn best_message(&self) -> Option<&str> {
        [&self.data_message, &self.inner_message, &self.message]
            .into_iter()
            .filter_map(|m| m.as_deref())
            .find(|m| !m.is_empty())
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.code, self.best_message()) {
            (Some(code), Some(message)) => write!(f, "{} (code {})", message, code),
            (None, Some(message)) => write!(f, "{}", message),
            (Some(code), None) => write!(f, "provider error code {}", code),
            (None, None) => write!(f, "unknown provider error"),
        }
    }
}

impl std::error::Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_rpc_error() {
        let err = ProviderError::from_json(&json!({
            "code": 4001,
            "message": "MetaMask Tx Signature: User denied transaction signature."
        }));
        assert!(err.is_user_rejected());
        assert_eq!(
            err.best_message(),
            Some("MetaMask Tx Signature: User denied transaction signature.")
        );
    }

    #[test]
    fn test_from_json_nested_shapes() {
        let err = ProviderError::from_json(&json!({
            "code": -32603,
            "message": "Internal JSON-RPC error.",
            "data": { "code": 3, "message": "execution reverted: Pausable: paused", "data": "0x08c379a0" }
        }));
        assert!(err.has_code(INTERNAL_ERROR));
        assert_eq!(err.best_message(), Some("execution reverted: Pausable: paused"));

        let err = ProviderError::from_json(&json!({
            "code": "UNPREDICTABLE_GAS_LIMIT",
            "message": "cannot estimate gas",
            "error": { "code": -32000, "message": "gas required exceeds allowance" }
        }));
        assert!(err.has_symbol(UNPREDICTABLE_GAS_LIMIT));
        assert_eq!(err.best_message(), Some("gas required exceeds allowance"));

        let err = ProviderError::from_json(&json!({ "error": { "code": 4902, "message": "Unrecognized chain ID" } }));
        assert!(err.is_unrecognized_chain());
    }

    #[test]
    fn test_from_json_scalars() {
        let err = ProviderError::from_json(&json!("boom"));
        assert_eq!(err.best_message(), Some("boom"));
        assert_eq!(err.code(), None);

        let err = ProviderError::from_json(&Value::Null);
        assert_eq!(err.best_message(), None);
        assert_eq!(err.to_string(), "unknown provider error");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ProviderError::new(-32601, "the method eth_foo does not exist").to_string(),
            "the method eth_foo does not exist (code -32601)"
        );
        assert_eq!(
            ProviderError::transport("connection refused").to_string(),
            "network error: connection refused"
        );
    }
}
