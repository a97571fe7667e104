use ethers::{
    providers::{JsonRpcClient, Middleware},
    types::{BlockId, BlockNumber},
};
use tracing::debug;

use crate::{
    blockchain::{client::EvmClient, models::Block, services::transactions::to_transaction},
    error::GatewayError,
    utils::{format_hash, narrow_u64},
};

/// Fetches the current chain head with its full transactions.
///
/// Resolves the head number first, then asks for that block by number.
pub async fn get_latest_block<P: JsonRpcClient>(
    client: &EvmClient<P>,
) -> Result<Block, GatewayError> {
    let provider = client.provider();

    let number = client.call(provider.get_block_number()).await?;
    debug!("Chain head is at block {}", number);

    let block = client
        .call(provider.get_block_with_txs(BlockId::Number(BlockNumber::Number(number))))
        .await?
        .ok_or(GatewayError::BlockNotFound(number.as_u64()))?;

    let hash = block.hash.ok_or(GatewayError::IncompleteBlock("hash"))?;
    let transactions = block
        .transactions
        .iter()
        .map(to_transaction)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Block {
        block_number: block.number.unwrap_or(number).as_u64(),
        timestamp: narrow_u64(block.timestamp, "timestamp")?,
        difficulty: block.difficulty.to_string(),
        hash: format_hash(&hash),
        transaction_count: transactions.len(),
        transactions,
    })
}
