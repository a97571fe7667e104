use ethers::{
    providers::{JsonRpcClient, Middleware},
    types::{Address, BlockId, BlockNumber},
};
use tracing::debug;

use crate::{blockchain::client::EvmClient, error::GatewayError};

/// Returns the wei balance of `address` at the latest block as a decimal
/// string. A failed query is an error; only a real empty account reads "0".
pub async fn get_balance<P: JsonRpcClient>(
    client: &EvmClient<P>,
    address: Address,
) -> Result<String, GatewayError> {
    let balance = client
        .call(
            client
                .provider()
                .get_balance(address, Some(BlockId::Number(BlockNumber::Latest))),
        )
        .await?;

    debug!("Balance of {:?} is {} wei", address, balance);
    Ok(balance.to_string())
}
