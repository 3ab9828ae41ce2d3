use crate::{
    address::Address,
    config::{DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT, MIN_LOCKUP_MINUTES, TOKEN_DECIMALS},
    units::{parse_units, UnitsError},
};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid address format: '{}'", _0)]
    InvalidAddress(String),
    #[error("Invalid amount '{}': {}", _0, _1)]
    InvalidAmount(String, UnitsError),
    #[error("Amount {} is out of range [{}, {}]", value, min, max)]
    AmountOutOfRange {
        value: String,
        min: u64,
        max: u64,
    },
    #[error("'{}' must be an integer greater or equal to {}", _0, _1)]
    InvalidInteger(String, u64),
}

impl ValidationError {
    // Whether the rejected input was an address rather than a number
    pub fn is_address(&self) -> bool {
        matches!(self, ValidationError::InvalidAddress(_))
    }
}

// An amount accepted for submission, kept both as typed and in base units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    display: String,
    base: U256,
}

impl TokenAmount {
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn base(&self) -> U256 {
        self.base
    }
}

// Inclusive bounds for amount inputs, in display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBounds {
    pub min: u64,
    pub max: u64,
}

impl Default for AmountBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_AMOUNT,
            max: DEFAULT_MAX_AMOUNT,
        }
    }
}

impl AmountBounds {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    fn scaled(value: u64) -> U256 {
        U256::from(value).saturating_mul(U256::exp10(TOKEN_DECIMALS as usize))
    }

    pub fn contains(&self, base: U256) -> bool {
        base >= Self::scaled(self.min) && base <= Self::scaled(self.max)
    }
}

// Address inputs are trimmed, then must be `0x` followed by 40 hex digits
pub fn validate_address(input: &str) -> Result<Address, ValidationError> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidAddress(trimmed.to_owned()))
}

pub fn validate_amount(input: &str, bounds: &AmountBounds) -> Result<TokenAmount, ValidationError> {
    let trimmed = input.trim();
    let base = parse_units(trimmed, TOKEN_DECIMALS)
        .map_err(|e| ValidationError::InvalidAmount(trimmed.to_owned(), e))?;

    if !bounds.contains(base) {
        return Err(ValidationError::AmountOutOfRange {
            value: trimmed.to_owned(),
            min: bounds.min,
            max: bounds.max,
        });
    }

    Ok(TokenAmount {
        display: trimmed.to_owned(),
        base,
    })
}

// Whole numbers only: no sign, no fraction, no exponent
pub fn validate_integer(input: &str, min: u64) -> Result<u64, ValidationError> {
    let trimmed = input.trim();
    let invalid = || ValidationError::InvalidInteger(trimmed.to_owned(), min);
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let value: u64 = trimmed.parse().map_err(|_| invalid())?;
    if value < min {
        return Err(invalid());
    }

    Ok(value)
}

pub fn validate_minutes(input: &str) -> Result<u64, ValidationError> {
    validate_integer(input, MIN_LOCKUP_MINUTES)
}
