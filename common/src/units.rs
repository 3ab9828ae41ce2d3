// Conversion between display units ("1.5") and base-unit fixed point integers.
// All arithmetic stays in base units; strings are only produced or consumed here.

use primitive_types::U256;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    #[error("Empty amount")]
    Empty,
    #[error("Invalid character in amount '{}'", _0)]
    InvalidCharacter(String),
    #[error("Too many decimals, maximum is {}", _0)]
    TooManyDecimals(u8),
    #[error("Amount is too big")]
    Overflow,
}

fn pow10(exponent: usize) -> U256 {
    U256::exp10(exponent)
}

// Parse a decimal string into base units
// Accepts "1", "1.5", ".5" and "5." but no sign, exponent or separators
pub fn parse_units(input: &str, decimals: u8) -> Result<U256, UnitsError> {
    if input.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (integer, fraction) = match input.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (input, ""),
    };

    if integer.is_empty() && fraction.is_empty() {
        return Err(UnitsError::InvalidCharacter(input.to_owned()));
    }

    if !integer.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(UnitsError::InvalidCharacter(input.to_owned()));
    }

    // Trailing zeros after the precision are harmless ("1.500000000000000000000")
    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooManyDecimals(decimals));
    }

    let integer = if integer.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(integer).map_err(|_| UnitsError::Overflow)?
    };

    let fraction = if fraction.is_empty() {
        U256::zero()
    } else {
        let padded = format!("{:0<width$}", fraction, width = decimals as usize);
        U256::from_dec_str(&padded).map_err(|_| UnitsError::Overflow)?
    };

    integer
        .checked_mul(pow10(decimals as usize))
        .and_then(|v| v.checked_add(fraction))
        .ok_or(UnitsError::Overflow)
}

// Split a base-unit value into its integer and zero-padded fraction digits
fn split_digits(value: U256, decimals: usize) -> (String, String) {
    let digits = value.to_string();
    if decimals == 0 {
        return (digits, String::new());
    }

    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (integer, fraction) = padded.split_at(padded.len() - decimals);
    (integer.to_owned(), fraction.to_owned())
}

// Format base units with every significant fraction digit, keeping at least one ("1.0")
pub fn format_units(value: U256, decimals: u8) -> String {
    let (integer, fraction) = split_digits(value, decimals as usize);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}.0", integer)
    } else {
        format!("{}.{}", integer, fraction)
    }
}

// Format base units with exactly `places` fraction digits, rounding half up
pub fn format_units_fixed(value: U256, decimals: u8, places: usize) -> String {
    let decimals = decimals as usize;
    let scaled = if places >= decimals {
        value.saturating_mul(pow10(places - decimals))
    } else {
        let divisor = pow10(decimals - places);
        let quotient = value / divisor;
        let remainder = value % divisor;
        if remainder >= divisor - remainder {
            quotient + U256::one()
        } else {
            quotient
        }
    };

    let (integer, fraction) = split_digits(scaled, places);
    if places == 0 {
        integer
    } else {
        format!("{}.{}", integer, fraction)
    }
}
