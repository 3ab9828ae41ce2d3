use primitive_types::U256;

pub const VERSION: &str = env!("BUILD_VERSION");

// Token managed by the panel
pub const TOKEN_SYMBOL: &str = "GPMF";
// 18 decimals numbers
pub const TOKEN_DECIMALS: u8 = 18;

// Native coin of the target chain
pub const NATIVE_SYMBOL: &str = "BNB";
pub const NATIVE_DECIMALS: u8 = 18;

// Fraction digits shown for the connected wallet balances
pub const NATIVE_BALANCE_DISPLAY_DECIMALS: usize = 4;
pub const TOKEN_BALANCE_DISPLAY_DECIMALS: usize = 2;

// Gas limit sent with a transaction is the estimate inflated by 20%
pub const GAS_LIMIT_MARGIN_NUMERATOR: u64 = 120;
pub const GAS_LIMIT_MARGIN_DENOMINATOR: u64 = 100;

// Amount inputs are bounded in display units
pub const DEFAULT_MIN_AMOUNT: u64 = 0;
// One billion tokens
pub const DEFAULT_MAX_AMOUNT: u64 = 1_000_000_000;

// Lock-up durations are expressed in whole minutes, at least one
pub const MIN_LOCKUP_MINUTES: u64 = 1;

// Inflate a gas estimate with the fixed safety margin
pub fn apply_gas_margin(estimate: U256) -> U256 {
    estimate.saturating_mul(U256::from(GAS_LIMIT_MARGIN_NUMERATOR))
        / U256::from(GAS_LIMIT_MARGIN_DENOMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_margin() {
        assert_eq!(apply_gas_margin(U256::from(21_000u64)), U256::from(25_200u64));
        assert_eq!(apply_gas_margin(U256::from(99u64)), U256::from(118u64));
        assert_eq!(apply_gas_margin(U256::zero()), U256::zero());
    }
}
