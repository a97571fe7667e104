use axum::{
    extract::{Path, State},
    Json,
};
use ethers::providers::JsonRpcClient;
use tracing::info;

use crate::{
    blockchain::{models::Transaction, services::transactions::get_transaction_by_hash},
    error::GatewayError,
    utils::parse_tx_hash,
    AppState,
};

/// Handler for the GET /api/v1/eth/tx/{hash} endpoint.
///
/// The hash is checked before the node is contacted.
pub async fn get_transaction_handler<P: JsonRpcClient + 'static>(
    Path(hash): Path<String>,
    State(state): State<AppState<P>>,
) -> Result<Json<Transaction>, GatewayError> {
    let hash = parse_tx_hash(&hash)?;
    info!("Received request for transaction {:#x}", hash);

    let transaction = get_transaction_by_hash(&state.evm_client, hash).await?;
    Ok(Json(transaction))
}
