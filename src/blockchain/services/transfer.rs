// src/blockchain/services/transfer.rs

use std::str::FromStr;

use ethers::{
    providers::{JsonRpcClient, Middleware},
    types::{transaction::eip2718::TypedTransaction, BlockNumber, TransactionRequest, H256, U256},
};
use ethers_signers::{LocalWallet, Signer};
use secrecy::ExposeSecret;
use tracing::info;

use crate::{
    blockchain::{
        client::EvmClient,
        models::{AmountInput, TransferRequest},
    },
    error::{GatewayError, TransferStep},
    utils::{narrow_u64, parse_address, parse_amount},
};

/// Gas limit of a plain value transfer to an externally owned account.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

pub fn resolve_amount(amount: &AmountInput) -> Result<U256, GatewayError> {
    match amount {
        AmountInput::Decimal(digits) => parse_amount(digits),
        AmountInput::Integer(wei) => Ok(U256::from(*wei)),
        AmountInput::Other(value) => Err(GatewayError::InvalidAmount(format!(
            "expected a non-negative integer or decimal string of wei, got {}",
            value
        ))),
    }
}

/// Signs and broadcasts a legacy ether transfer, returning the node's hash
/// for it.
///
/// Input is validated before the key is touched, and the key is parsed before
/// any remote call. Every later step reports itself through
/// [`TransferStep`] when it fails.
pub async fn transfer_ether<P: JsonRpcClient>(
    client: &EvmClient<P>,
    request: &TransferRequest,
) -> Result<H256, GatewayError> {
    let to = parse_address(&request.to)?;
    let amount = resolve_amount(&request.amount)?;

    // The parser's message may quote key material, so it is not forwarded.
    let wallet = LocalWallet::from_str(request.private_key.expose_secret()).map_err(|_| {
        GatewayError::transfer(
            TransferStep::KeyParsing,
            "private key must be 32 bytes of hex",
        )
    })?;
    let from = wallet.address();
    let provider = client.provider();

    let nonce = client
        .call(provider.get_transaction_count(from, Some(BlockNumber::Pending.into())))
        .await
        .map_err(|e| GatewayError::transfer(TransferStep::Nonce, e))?;

    let gas_price = client
        .call(provider.get_gas_price())
        .await
        .map_err(|e| GatewayError::transfer(TransferStep::GasPrice, e))?;

    let chain_id = client
        .call(provider.get_chainid())
        .await
        .map_err(|e| GatewayError::transfer(TransferStep::ChainId, e))?;
    let chain_id = narrow_u64(chain_id, "chain id")
        .map_err(|e| GatewayError::transfer(TransferStep::ChainId, e))?;

    let tx: TypedTransaction = TransactionRequest::new()
        .from(from)
        .to(to)
        .value(amount)
        .gas(TRANSFER_GAS_LIMIT)
        .gas_price(gas_price)
        .nonce(nonce)
        .chain_id(chain_id)
        .into();

    let signature = wallet
        .with_chain_id(chain_id)
        .sign_transaction_sync(&tx)
        .map_err(|e| GatewayError::transfer(TransferStep::Signing, e.to_string()))?;
    let raw = tx.rlp_signed(&signature);

    let pending = client
        .call(provider.send_raw_transaction(raw))
        .await
        .map_err(|e| GatewayError::transfer(TransferStep::Broadcast, e))?;
    let hash = *pending;

    info!(
        "Broadcast transfer {:#x}: {:?} -> {:?}, {} wei, nonce {}, chain {}",
        hash, from, to, amount, nonce, chain_id
    );
    Ok(hash)
}
