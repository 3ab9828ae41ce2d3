use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

// Fixed user-facing texts that do not depend on a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    InstallWallet,
    ConnectWalletFirst,
    WalletConnectionFailed,
    NetworkSwitchFailed,
    UnsupportedNetwork,
    OwnerRequired,
    ActionInProgress,
    ConnectWallet,
    RefreshWallet,
    RoleOwner,
    RoleUser,
    RoleCheckFailed,
    NativeBalanceFailed,
    TokenBalanceFailed,
    StatePaused,
    StateActive,
    QueryFailed,
    NoActiveLockup,
    UnknownError,
}

impl Text {
    pub fn get(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.english(),
            Locale::Ko => self.korean(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            Text::InstallWallet => "Please install Trust Wallet or MetaMask.",
            Text::ConnectWalletFirst => "Please connect your wallet first.",
            Text::WalletConnectionFailed => "Wallet connection failed.",
            Text::NetworkSwitchFailed => "Failed to switch network",
            Text::UnsupportedNetwork => "Unsupported network. Only BSC Mainnet is available.",
            Text::OwnerRequired => "Owner role is required.",
            Text::ActionInProgress => "This action is already in progress.",
            Text::ConnectWallet => "Connect wallet",
            Text::RefreshWallet => "Refresh wallet",
            Text::RoleOwner => "OWNER (administrator)",
            Text::RoleUser => "Regular user",
            Text::RoleCheckFailed => "Role check failed",
            Text::NativeBalanceFailed => "Balance lookup failed",
            Text::TokenBalanceFailed => "Token balance lookup failed",
            Text::StatePaused => "Paused",
            Text::StateActive => "Active",
            Text::QueryFailed => "Query failed",
            Text::NoActiveLockup => "This account has no active lock-up.",
            Text::UnknownError => "An unknown error occurred.",
        }
    }

    fn korean(self) -> &'static str {
        match self {
            Text::InstallWallet => "Trust Wallet 또는 메타마스크를 설치해주세요.",
            Text::ConnectWalletFirst => "지갑을 먼저 연결해주세요.",
            Text::WalletConnectionFailed => "지갑 연결 실패",
            Text::NetworkSwitchFailed => "네트워크 전환에 실패했습니다",
            Text::UnsupportedNetwork => "지원하지 않는 네트워크입니다. BSC Mainnet만 사용할 수 있습니다.",
            Text::OwnerRequired => "Owner 권한이 필요합니다.",
            Text::ActionInProgress => "이미 처리 중인 작업입니다.",
            Text::ConnectWallet => "지갑 연결",
            Text::RefreshWallet => "지갑 새로고침",
            Text::RoleOwner => "OWNER (관리자)",
            Text::RoleUser => "일반 사용자",
            Text::RoleCheckFailed => "권한 확인 실패",
            Text::NativeBalanceFailed => "잔액 확인 실패",
            Text::TokenBalanceFailed => "토큰 잔액 확인 실패",
            Text::StatePaused => "일시정지 상태",
            Text::StateActive => "정상",
            Text::QueryFailed => "조회 실패",
            Text::NoActiveLockup => "아직 락업 상태가 아닙니다.",
            Text::UnknownError => "알 수 없는 오류가 발생했습니다.",
        }
    }
}

// The contract did not answer on the selected network
pub fn contract_not_found(locale: Locale, network: &str, contract: &str) -> String {
    match locale {
        Locale::En => format!(
            "The contract could not be found on {}.\n\nCheck that the configured contract address is correct.\n\nCurrent address: {}",
            network, contract
        ),
        Locale::Ko => format!(
            "{}에서 컨트랙트를 찾을 수 없습니다.\n\n설정된 컨트랙트 주소가 올바른지 확인해주세요.\n\n현재 주소: {}",
            network, contract
        ),
    }
}

pub fn contract_connection_failed(locale: Locale, network: &str, reason: &str) -> String {
    match locale {
        Locale::En => format!("Failed to reach the contract on {}.\n\nError: {}", network, reason),
        Locale::Ko => format!("{}에서 컨트랙트 연결에 실패했습니다.\n\n오류: {}", network, reason),
    }
}

pub fn integer_required(locale: Locale, min: u64) -> String {
    match locale {
        Locale::En => format!("Must be a whole number of at least {}.", min),
        Locale::Ko => format!("{} 이상의 정수여야 합니다.", min),
    }
}

pub fn amount_out_of_range(locale: Locale, min: u64, max: u64) -> String {
    match locale {
        Locale::En => format!("Amount must be between {} and {}.", min, max),
        Locale::Ko => format!("수량은 {} 이상 {} 이하여야 합니다.", min, max),
    }
}
