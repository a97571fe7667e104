//! Blockchain client module for the upstream Ethereum node.
//!
//! `EvmClient` is the one handle every request shares. It owns the JSON-RPC
//! provider and puts a timeout and a concurrency bound around each call made
//! through it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ethers::providers::{Http, JsonRpcClient, Provider, ProviderError};
use tokio::sync::Semaphore;

use crate::{config::Config, error::RpcError};

/// Client for the single configured EVM node.
///
/// Generic over the transport so tests can swap in a mocked provider.
pub struct EvmClient<P = Http> {
    provider: Arc<Provider<P>>,
    limiter: Arc<Semaphore>,
    timeout: Duration,
}

impl<P> Clone for EvmClient<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            limiter: Arc::clone(&self.limiter),
            timeout: self.timeout,
        }
    }
}

impl EvmClient<Http> {
    /// Create a new EvmClient for the node configured in `config`
    pub fn new(config: &Config) -> Result<Self> {
        let provider = create_provider(&config.eth_rpc_url)?;
        Ok(Self::from_provider(
            provider,
            config.rpc_timeout,
            config.max_concurrent_rpc,
        ))
    }
}

impl<P: JsonRpcClient> EvmClient<P> {
    pub fn from_provider(provider: Provider<P>, timeout: Duration, max_concurrent: usize) -> Self {
        Self {
            provider: Arc::new(provider),
            limiter: Arc::new(Semaphore::new(max_concurrent)),
            timeout,
        }
    }

    pub fn provider(&self) -> &Provider<P> {
        &self.provider
    }

    /// Runs one remote call under the concurrency limit and the call timeout.
    /// Time spent waiting for a permit counts against the timeout.
    pub async fn call<T, F>(&self, request: F) -> Result<T, RpcError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        let guarded = async {
            let _permit = self
                .limiter
                .acquire()
                .await
                .map_err(|_| RpcError::LimiterClosed)?;
            request.await.map_err(RpcError::from)
        };

        match tokio::time::timeout(self.timeout, guarded).await {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout(self.timeout)),
        }
    }
}

/// Create a provider for the given RPC URL
pub fn create_provider(rpc_url: &str) -> Result<Provider<Http>> {
    Provider::<Http>::try_from(rpc_url)
        .map_err(|e| anyhow::anyhow!("Failed to create provider for {}: {}", rpc_url, e))
}
