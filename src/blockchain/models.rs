// src/blockchain/models.rs
//! Response and request records of the HTTP API.
//!
//! Integers that can outgrow 64 bits on a real chain (`value`, `gasPrice`,
//! `difficulty`, balances) are serialized as decimal strings, not JSON
//! numbers, so clients never lose precision. Gas limit, nonce, block number
//! and timestamp stay JSON numbers.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

// --- Block Models ---

/// The chain head as returned by `GET /api/v1/eth/block`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub block_number: u64,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
    /// Decimal string; post-merge chains report zero
    pub difficulty: String,
    pub hash: String,
    pub transaction_count: usize,
    pub transactions: Vec<Transaction>,
}

// --- Transaction Models ---

/// A transaction reshaped into flat, string-safe fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    /// Wei, as a decimal string
    pub value: String,
    /// Gas limit
    pub gas: u64,
    /// Wei per gas, as a decimal string
    pub gas_price: String,
    pub nonce: u64,
    /// Checksummed recipient; `null` for contract creation
    pub to: Option<String>,
    /// Only set when the transaction was looked up by hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
}

// --- Balance Models ---

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// Wei, as a decimal string
    pub balance: String,
}

// --- Transfer Models ---

/// Amount of wei to send. Accepts a decimal string of any size or a plain
/// JSON integer. Anything else is kept so it can be rejected as an invalid
/// amount instead of an unreadable body.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Decimal(String),
    Integer(u64),
    Other(serde_json::Value),
}

/// Body of `POST /api/v1/eth/transfer`.
///
/// The private key stays wrapped so it cannot leak through `Debug` or logs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub private_key: SecretString,
    pub to: String,
    pub amount: AmountInput,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransferResponse {
    pub hash: String,
}
