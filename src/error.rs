// src/error.rs

use std::fmt;
use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ethers::{providers::ProviderError, types::H256};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Failure of a single call to the remote node.
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("node request failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("node did not answer within {0:?}")]
    Timeout(Duration),

    #[error("rpc concurrency limiter is closed")]
    LimiterClosed,
}

/// The step of an ether transfer that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStep {
    KeyParsing,
    Nonce,
    GasPrice,
    ChainId,
    Signing,
    Broadcast,
}

impl TransferStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStep::KeyParsing => "key_parsing",
            TransferStep::Nonce => "nonce",
            TransferStep::GasPrice => "gas_price",
            TransferStep::ChainId => "chain_id",
            TransferStep::Signing => "signing",
            TransferStep::Broadcast => "broadcast",
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TransferStep::KeyParsing => "TRANSFER_KEY_PARSING_FAILED",
            TransferStep::Nonce => "TRANSFER_NONCE_FAILED",
            TransferStep::GasPrice => "TRANSFER_GAS_PRICE_FAILED",
            TransferStep::ChainId => "TRANSFER_CHAIN_ID_FAILED",
            TransferStep::Signing => "TRANSFER_SIGNING_FAILED",
            TransferStep::Broadcast => "TRANSFER_BROADCAST_FAILED",
        }
    }

    /// Key parsing and signing depend only on caller input.
    fn is_client_fault(&self) -> bool {
        matches!(self, TransferStep::KeyParsing | TransferStep::Signing)
    }
}

impl fmt::Display for TransferStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gateway error types
///
/// Every failure a request can end in. Each variant maps to one HTTP status
/// and a machine-readable error code in [`IntoResponse`].
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("transaction {0:#x} not found")]
    TransactionNotFound(H256),

    #[error("node returned no block for number {0}")]
    BlockNotFound(u64),

    #[error("node returned a block without {0}")]
    IncompleteBlock(&'static str),

    #[error("node returned a transaction without {0}")]
    IncompleteTransaction(&'static str),

    #[error("{0} does not fit in 64 bits")]
    Overflow(&'static str),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("transfer failed at {step}: {source}")]
    Transfer {
        step: TransferStep,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl GatewayError {
    pub fn transfer<E>(step: TransferStep, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        GatewayError::Transfer {
            step,
            source: source.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidHash(_)
            | GatewayError::InvalidAddress(_)
            | GatewayError::InvalidAmount(_)
            | GatewayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            GatewayError::TransactionNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::BlockNotFound(_)
            | GatewayError::IncompleteBlock(_)
            | GatewayError::IncompleteTransaction(_)
            | GatewayError::Overflow(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Rpc(rpc) => rpc_status(rpc),
            GatewayError::Transfer { step, source } => {
                if step.is_client_fault() {
                    StatusCode::BAD_REQUEST
                } else if let Some(rpc) = source.downcast_ref::<RpcError>() {
                    rpc_status(rpc)
                } else {
                    StatusCode::BAD_GATEWAY
                }
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::InvalidHash(_) => "INVALID_HASH",
            GatewayError::InvalidAddress(_) => "INVALID_ADDRESS",
            GatewayError::InvalidAmount(_) => "INVALID_AMOUNT",
            GatewayError::InvalidBody(_) => "INVALID_BODY",
            GatewayError::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            GatewayError::BlockNotFound(_) => "BLOCK_NOT_FOUND",
            GatewayError::IncompleteBlock(_) => "INCOMPLETE_BLOCK",
            GatewayError::IncompleteTransaction(_) => "INCOMPLETE_TRANSACTION",
            GatewayError::Overflow(_) => "NUMERIC_OVERFLOW",
            GatewayError::Rpc(RpcError::Provider(_)) => "RPC_ERROR",
            GatewayError::Rpc(RpcError::Timeout(_)) => "RPC_TIMEOUT",
            GatewayError::Rpc(RpcError::LimiterClosed) => "RPC_UNAVAILABLE",
            GatewayError::Transfer { step, .. } => step.error_code(),
        }
    }
}

fn rpc_status(err: &RpcError) -> StatusCode {
    match err {
        RpcError::Provider(_) => StatusCode::BAD_GATEWAY,
        RpcError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        RpcError::LimiterClosed => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// JSON body of every error response.
#[derive(Serialize)]
struct ErrorResponse {
    /// Human-readable error message
    error: String,
    /// Machine-readable error code
    error_code: &'static str,
    /// Underlying cause, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error_code = self.error_code(), "request failed: {}", self);
        } else {
            warn!(error_code = self.error_code(), "request rejected: {}", self);
        }

        let details = std::error::Error::source(&self).map(|cause| cause.to_string());
        let body = ErrorResponse {
            error: self.to_string(),
            error_code: self.error_code(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input_is_a_client_error() {
        let err = GatewayError::InvalidAddress("0x12".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_ADDRESS");

        let err = GatewayError::InvalidBody("missing field `amount`".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_BODY");
    }

    #[test]
    fn missing_transaction_is_not_found() {
        let err = GatewayError::TransactionNotFound(H256::zero());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn timeouts_map_to_gateway_timeout() {
        let err = GatewayError::from(RpcError::Timeout(Duration::from_secs(1)));
        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.error_code(), "RPC_TIMEOUT");
    }

    #[test]
    fn transfer_step_decides_status() {
        let key = GatewayError::transfer(TransferStep::KeyParsing, "bad hex");
        assert_eq!(key.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(key.error_code(), "TRANSFER_KEY_PARSING_FAILED");

        let nonce = GatewayError::transfer(
            TransferStep::Nonce,
            RpcError::Timeout(Duration::from_millis(5)),
        );
        assert_eq!(nonce.status_code(), StatusCode::GATEWAY_TIMEOUT);

        let broadcast = GatewayError::transfer(TransferStep::Broadcast, "nonce too low");
        assert_eq!(broadcast.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(broadcast.error_code(), "TRANSFER_BROADCAST_FAILED");
    }
}
