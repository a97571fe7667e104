use axum::{extract::State, Json};
use ethers::providers::JsonRpcClient;
use tracing::info;

use crate::{
    blockchain::{models::Block, services::block::get_latest_block},
    error::GatewayError,
    AppState,
};

/// Handler for the GET /api/v1/eth/block endpoint.
pub async fn get_latest_block_handler<P: JsonRpcClient + 'static>(
    State(state): State<AppState<P>>,
) -> Result<Json<Block>, GatewayError> {
    let block = get_latest_block(&state.evm_client).await?;
    info!(
        "Served block {} with {} transactions",
        block.block_number, block.transaction_count
    );
    Ok(Json(block))
}
