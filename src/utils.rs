//! Input parsing and numeric narrowing shared by the services.

use ethers::{
    types::{Address, H256, U256},
    utils::to_checksum,
};

use crate::error::GatewayError;

fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

fn is_hex(digits: &str) -> bool {
    digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parses a 32-byte transaction hash, with or without a `0x` prefix.
pub fn parse_tx_hash(input: &str) -> Result<H256, GatewayError> {
    let digits = strip_hex_prefix(input.trim());
    if digits.len() != 64 || !is_hex(digits) {
        return Err(GatewayError::InvalidHash(format!(
            "expected 64 hex digits, got '{}'",
            input
        )));
    }
    let bytes = hex::decode(digits).map_err(|e| GatewayError::InvalidHash(e.to_string()))?;
    Ok(H256::from_slice(&bytes))
}

/// Parses a 20-byte address. Mixed-case input must carry a valid EIP-55
/// checksum; single-case input is taken as is.
pub fn parse_address(input: &str) -> Result<Address, GatewayError> {
    let digits = strip_hex_prefix(input.trim());
    if digits.len() != 40 || !is_hex(digits) {
        return Err(GatewayError::InvalidAddress(format!(
            "expected 40 hex digits, got '{}'",
            input
        )));
    }
    let bytes = hex::decode(digits).map_err(|e| GatewayError::InvalidAddress(e.to_string()))?;
    let address = Address::from_slice(&bytes);

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(&address, None)[2..] != *digits {
        return Err(GatewayError::InvalidAddress(format!(
            "checksum mismatch for '{}'",
            input
        )));
    }

    Ok(address)
}

/// Parses a non-negative decimal amount of wei.
pub fn parse_amount(input: &str) -> Result<U256, GatewayError> {
    let digits = input.trim();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(GatewayError::InvalidAmount(format!(
            "expected a decimal number of wei, got '{}'",
            input
        )));
    }
    U256::from_dec_str(digits).map_err(|e| GatewayError::InvalidAmount(format!("{:?}", e)))
}

/// Narrows a node-supplied value to `u64`, refusing to truncate.
pub fn narrow_u64(value: U256, field: &'static str) -> Result<u64, GatewayError> {
    if value.bits() > 64 {
        return Err(GatewayError::Overflow(field));
    }
    Ok(value.low_u64())
}

pub fn format_hash(hash: &H256) -> String {
    format!("{:#x}", hash)
}

pub fn format_address(address: &Address) -> String {
    to_checksum(address, None)
}
