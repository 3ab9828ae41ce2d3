// Minimal Solidity ABI codec for the calls issued by the panel:
// static arguments (address, uint256, bool) plus string return values.

use crate::address::{Address, ADDRESS_SIZE};
use primitive_types::U256;
use sha3::{Digest, Keccak256};
use thiserror::Error;

pub const WORD_SIZE: usize = 32;
pub const SELECTOR_SIZE: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    // A call against an address without code returns "0x"
    #[error("Returned values aren't valid: empty return data")]
    EmptyData,
    #[error("Returned values aren't valid: expected {} bytes at offset {}, got {}", needed, offset, available)]
    OutOfBounds {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("Returned values aren't valid: invalid {} value", _0)]
    InvalidValue(&'static str),
    #[error("Invalid hex data: {}", _0)]
    InvalidHex(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    Uint(U256),
    Bool(bool),
    String(String),
}

// First 4 bytes of the keccak256 of the canonical signature
pub fn selector(signature: &str) -> [u8; SELECTOR_SIZE] {
    let digest = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; SELECTOR_SIZE];
    out.copy_from_slice(&digest[..SELECTOR_SIZE]);
    out
}

fn uint_word(value: U256) -> [u8; WORD_SIZE] {
    value.to_big_endian()
}

fn static_word(token: &Token) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    match token {
        Token::Address(address) => word[WORD_SIZE - ADDRESS_SIZE..].copy_from_slice(address.as_bytes()),
        Token::Uint(value) => word = uint_word(*value),
        Token::Bool(value) => word[WORD_SIZE - 1] = *value as u8,
        Token::String(_) => {}
    }
    word
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

// Head/tail encoding of a tuple of tokens
pub fn encode_tokens(tokens: &[Token]) -> Vec<u8> {
    let head_size = tokens.len() * WORD_SIZE;
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            Token::String(value) => {
                head.extend_from_slice(&uint_word(U256::from(head_size + tail.len())));
                let bytes = value.as_bytes();
                tail.extend_from_slice(&uint_word(U256::from(bytes.len())));
                tail.extend_from_slice(bytes);
                tail.resize(tail.len() + padded_len(bytes.len()) - bytes.len(), 0);
            }
            _ => head.extend_from_slice(&static_word(token)),
        }
    }

    head.extend_from_slice(&tail);
    head
}

// A fully encoded contract function call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    signature: &'static str,
    args: Vec<Token>,
}

impl ContractCall {
    pub fn new(signature: &'static str, args: Vec<Token>) -> Self {
        Self { signature, args }
    }

    pub fn signature(&self) -> &'static str {
        self.signature
    }

    pub fn args(&self) -> &[Token] {
        &self.args
    }

    pub fn data(&self) -> Vec<u8> {
        let mut data = selector(self.signature).to_vec();
        data.extend(encode_tokens(&self.args));
        data
    }
}

fn word_at(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    if data.is_empty() {
        return Err(AbiError::EmptyData);
    }

    let out_of_bounds = AbiError::OutOfBounds {
        offset,
        needed: WORD_SIZE,
        available: data.len().saturating_sub(offset),
    };
    let end = offset.checked_add(WORD_SIZE).ok_or_else(|| out_of_bounds.clone())?;
    data.get(offset..end).ok_or(out_of_bounds)
}

fn word_to_usize(word: &[u8]) -> Result<usize, AbiError> {
    let value = U256::from_big_endian(word);
    if value > U256::from(usize::MAX) {
        return Err(AbiError::InvalidValue("offset"));
    }
    Ok(value.as_usize())
}

// Decode the uint256 at the given return slot
pub fn decode_uint(data: &[u8], index: usize) -> Result<U256, AbiError> {
    let word = word_at(data, index * WORD_SIZE)?;
    Ok(U256::from_big_endian(word))
}

pub fn decode_u8(data: &[u8], index: usize) -> Result<u8, AbiError> {
    let value = decode_uint(data, index)?;
    if value > U256::from(u8::MAX) {
        return Err(AbiError::InvalidValue("uint8"));
    }
    Ok(value.low_u32() as u8)
}

pub fn decode_u64(data: &[u8], index: usize) -> Result<u64, AbiError> {
    let value = decode_uint(data, index)?;
    if value > U256::from(u64::MAX) {
        return Err(AbiError::InvalidValue("uint64"));
    }
    Ok(value.low_u64())
}

pub fn decode_bool(data: &[u8], index: usize) -> Result<bool, AbiError> {
    let word = word_at(data, index * WORD_SIZE)?;
    if word[..WORD_SIZE - 1].iter().any(|b| *b != 0) {
        return Err(AbiError::InvalidValue("bool"));
    }
    match word[WORD_SIZE - 1] {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(AbiError::InvalidValue("bool")),
    }
}

pub fn decode_address(data: &[u8], index: usize) -> Result<Address, AbiError> {
    let word = word_at(data, index * WORD_SIZE)?;
    let (padding, bytes) = word.split_at(WORD_SIZE - ADDRESS_SIZE);
    if padding.iter().any(|b| *b != 0) {
        return Err(AbiError::InvalidValue("address"));
    }

    let mut out = [0u8; ADDRESS_SIZE];
    out.copy_from_slice(bytes);
    Ok(Address::new(out))
}

// Decode a dynamic string referenced from the given return slot
pub fn decode_string(data: &[u8], index: usize) -> Result<String, AbiError> {
    let offset = word_to_usize(word_at(data, index * WORD_SIZE)?)?;
    let len = word_to_usize(word_at(data, offset)?)?;
    let start = offset.saturating_add(WORD_SIZE);
    let bytes = data.get(start..start.saturating_add(len)).ok_or(AbiError::OutOfBounds {
        offset: start,
        needed: len,
        available: data.len().saturating_sub(start),
    })?;

    String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::InvalidValue("string"))
}

// 0x-prefixed hex for call data
pub fn to_hex_data(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

pub fn from_hex_data(value: &str) -> Result<Vec<u8>, AbiError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(stripped).map_err(|_| AbiError::InvalidHex(value.to_owned()))
}

// JSON-RPC quantity: 0x-prefixed, no leading zeros, "0x0" for zero
pub fn to_quantity(value: U256) -> String {
    format!("{:#x}", value)
}

pub fn parse_quantity(value: &str) -> Result<U256, AbiError> {
    let stripped = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| AbiError::InvalidHex(value.to_owned()))?;
    if stripped.is_empty() {
        return Err(AbiError::InvalidHex(value.to_owned()));
    }
    U256::from_str_radix(stripped, 16).map_err(|_| AbiError::InvalidHex(value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors() {
        assert_eq!(hex::encode(selector("transfer(address,uint256)")), "a9059cbb");
        assert_eq!(hex::encode(selector("balanceOf(address)")), "70a08231");
        assert_eq!(hex::encode(selector("totalSupply()")), "18160ddd");
        assert_eq!(hex::encode(selector("name()")), "06fdde03");
        assert_eq!(hex::encode(selector("owner()")), "8da5cb5b");
        assert_eq!(hex::encode(selector("pause()")), "8456cb59");
        assert_eq!(hex::encode(selector("burn(uint256)")), "42966c68");
    }

    #[test]
    fn test_encode_transfer() {
        let to: Address = "0x00000000000000000000000000000000000000ff".parse().unwrap();
        let call = ContractCall::new(
            "transfer(address,uint256)",
            vec![Token::Address(to), Token::Uint(U256::from(1000u64))],
        );
        let data = call.data();
        assert_eq!(data.len(), 4 + 64);
        assert_eq!(
            hex::encode(&data),
            concat!(
                "a9059cbb",
                "00000000000000000000000000000000000000000000000000000000000000ff",
                "00000000000000000000000000000000000000000000000000000000000003e8"
            )
        );
    }

    #[test]
    fn test_string_codec() {
        let encoded = encode_tokens(&[Token::String("GPMF Gold".to_owned())]);
        // offset, length, one padded word
        assert_eq!(encoded.len(), 3 * WORD_SIZE);
        assert_eq!(decode_string(&encoded, 0).unwrap(), "GPMF Gold");

        let mixed = encode_tokens(&[
            Token::Uint(U256::from(7u64)),
            Token::String(String::new()),
            Token::Bool(true),
        ]);
        assert_eq!(decode_uint(&mixed, 0).unwrap(), U256::from(7u64));
        assert_eq!(decode_string(&mixed, 1).unwrap(), "");
        assert!(decode_bool(&mixed, 2).unwrap());
    }

    #[test]
    fn test_static_decoding() {
        let owner: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();
        let encoded = encode_tokens(&[
            Token::Address(owner),
            Token::Uint(U256::from(18u64)),
            Token::Bool(false),
        ]);
        assert_eq!(decode_address(&encoded, 0).unwrap(), owner);
        assert_eq!(decode_u8(&encoded, 1).unwrap(), 18);
        assert!(!decode_bool(&encoded, 2).unwrap());
        assert_eq!(decode_u64(&encoded, 1).unwrap(), 18);
    }

    #[test]
    fn test_malformed_data() {
        assert_eq!(decode_uint(&[], 0), Err(AbiError::EmptyData));
        assert!(matches!(decode_uint(&[0u8; 16], 0), Err(AbiError::OutOfBounds { .. })));
        assert!(matches!(decode_uint(&[0u8; 32], 1), Err(AbiError::OutOfBounds { .. })));

        let mut not_bool = [0u8; 32];
        not_bool[31] = 2;
        assert_eq!(decode_bool(&not_bool, 0), Err(AbiError::InvalidValue("bool")));

        let dirty_address = [0xffu8; 32];
        assert_eq!(decode_address(&dirty_address, 0), Err(AbiError::InvalidValue("address")));
    }

    #[test]
    fn test_quantities() {
        assert_eq!(to_quantity(U256::zero()), "0x0");
        assert_eq!(to_quantity(U256::from(56u64)), "0x38");
        assert_eq!(parse_quantity("0x38").unwrap(), U256::from(56u64));
        assert_eq!(parse_quantity("0x0").unwrap(), U256::zero());
        assert!(parse_quantity("38").is_err());
        assert!(parse_quantity("0x").is_err());
        assert!(parse_quantity("0xzz").is_err());
        assert_eq!(from_hex_data("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(to_hex_data(&[0xab, 0x01]), "0xab01");
    }
}
