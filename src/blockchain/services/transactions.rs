// src/blockchain/services/transactions.rs

use ethers::{
    providers::{JsonRpcClient, Middleware},
    types::{Transaction as EthTransaction, H256},
};
use tracing::debug;

use crate::{
    blockchain::{client::EvmClient, models::Transaction},
    error::GatewayError,
    utils::{format_address, format_hash, narrow_u64},
};

/// Reshapes a node transaction into the flat response record.
///
/// A missing recipient (contract creation) becomes `None`. Typed transactions
/// that carry no legacy gas price report their fee cap instead; a transaction
/// with neither is rejected rather than reported as free.
pub fn to_transaction(tx: &EthTransaction) -> Result<Transaction, GatewayError> {
    let gas_price = tx
        .gas_price
        .or(tx.max_fee_per_gas)
        .ok_or(GatewayError::IncompleteTransaction("gas price"))?;

    Ok(Transaction {
        hash: format_hash(&tx.hash),
        value: tx.value.to_string(),
        gas: narrow_u64(tx.gas, "gas limit")?,
        gas_price: gas_price.to_string(),
        nonce: narrow_u64(tx.nonce, "nonce")?,
        to: tx.to.as_ref().map(format_address),
        pending: None,
    })
}

/// Looks up a transaction by hash. A transaction the node has not yet put in
/// a block is reported as pending.
pub async fn get_transaction_by_hash<P: JsonRpcClient>(
    client: &EvmClient<P>,
    hash: H256,
) -> Result<Transaction, GatewayError> {
    let tx = client
        .call(client.provider().get_transaction(hash))
        .await?
        .ok_or(GatewayError::TransactionNotFound(hash))?;

    let pending = tx.block_number.is_none();
    debug!("Found transaction {:#x} (pending: {})", hash, pending);

    let mut record = to_transaction(&tx)?;
    record.pending = Some(pending);
    Ok(record)
}
