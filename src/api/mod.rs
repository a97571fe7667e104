//! # API Module
//!
//! HTTP handlers for the gateway. Each handler validates its input, calls one
//! translator operation and serializes the result.
//!
//! ## Available Endpoints
//!
//! - `GET /health` - Liveness check, never touches the node
//! - `GET /api/v1/eth/block` - Latest block with its transactions
//! - `GET /api/v1/eth/tx/:hash` - Transaction by hash, with pending flag
//! - `GET /api/v1/eth/balance/:address` - Balance in wei at the latest block
//! - `POST /api/v1/eth/transfer` - Sign and broadcast an ether transfer

use axum::{
    routing::{get, post},
    Router,
};
use ethers::providers::JsonRpcClient;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub mod balance;
pub mod block;
pub mod health;
pub mod transfer;
pub mod tx;

/// Builds the complete application router around `state`.
pub fn create_router<P>(state: AppState<P>) -> Router
where
    P: JsonRpcClient + 'static,
{
    let eth_router = Router::new()
        .route("/block", get(block::get_latest_block_handler::<P>))
        .route("/tx/:hash", get(tx::get_transaction_handler::<P>))
        .route("/balance/:address", get(balance::get_balance_handler::<P>))
        .route("/transfer", post(transfer::transfer_handler::<P>));

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api/v1/eth", eth_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::new())
}
