use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use ethers::providers::JsonRpcClient;
use tracing::info;

use crate::{
    blockchain::{
        models::{TransferRequest, TransferResponse},
        services::transfer::transfer_ether,
    },
    error::GatewayError,
    utils::format_hash,
    AppState,
};

/// Handler for the POST /api/v1/eth/transfer endpoint.
///
/// The caller's private key travels in the body, so this endpoint must only
/// ever be exposed over TLS. It is used for this one request and dropped.
pub async fn transfer_handler<P: JsonRpcClient + 'static>(
    State(state): State<AppState<P>>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<TransferResponse>, GatewayError> {
    let Json(request) = payload.map_err(|e| GatewayError::InvalidBody(e.body_text()))?;
    info!("Received transfer request to {}", request.to);

    let hash = transfer_ether(&state.evm_client, &request).await?;
    Ok(Json(TransferResponse {
        hash: format_hash(&hash),
    }))
}
