use crate::{
    address::Address,
    config::{
        NATIVE_BALANCE_DISPLAY_DECIMALS,
        NATIVE_DECIMALS,
        NATIVE_SYMBOL,
        TOKEN_BALANCE_DISPLAY_DECIMALS,
        TOKEN_DECIMALS,
        TOKEN_SYMBOL,
    },
    i18n::{Locale, Text},
    units::{format_units, format_units_fixed},
};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

// Contract level state shown in the status section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSnapshot {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
    pub paused: bool,
    pub owner: Address,
}

impl ContractSnapshot {
    pub fn total_supply_display(&self) -> String {
        format!("{} {}", format_units(self.total_supply, TOKEN_DECIMALS), TOKEN_SYMBOL)
    }

    pub fn paused_display(&self, locale: Locale) -> &'static str {
        if self.paused {
            Text::StatePaused.get(locale)
        } else {
            Text::StateActive.get(locale)
        }
    }
}

// Connected wallet balance in the native coin, "0.1235 BNB"
pub fn format_native_balance(wei: U256) -> String {
    format!(
        "{} {}",
        format_units_fixed(wei, NATIVE_DECIMALS, NATIVE_BALANCE_DISPLAY_DECIMALS),
        NATIVE_SYMBOL
    )
}

// Connected wallet balance in tokens, "12.50 GPMF"
pub fn format_token_balance(amount: U256) -> String {
    format!(
        "{} {}",
        format_units_fixed(amount, TOKEN_DECIMALS, TOKEN_BALANCE_DISPLAY_DECIMALS),
        TOKEN_SYMBOL
    )
}
