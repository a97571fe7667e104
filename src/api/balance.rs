use axum::{
    extract::{Path, State},
    Json,
};
use ethers::providers::JsonRpcClient;
use tracing::info;

use crate::{
    blockchain::{models::BalanceResponse, services::balance::get_balance},
    error::GatewayError,
    utils::parse_address,
    AppState,
};

// The handler function for the GET /api/v1/eth/balance/{address} endpoint.
pub async fn get_balance_handler<P: JsonRpcClient + 'static>(
    Path(address): Path<String>,
    State(state): State<AppState<P>>,
) -> Result<Json<BalanceResponse>, GatewayError> {
    let address = parse_address(&address)?;
    info!("Received balance request for {:?}", address);

    let balance = get_balance(&state.evm_client, address).await?;
    Ok(Json(BalanceResponse { balance }))
}
