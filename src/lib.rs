// src/lib.rs

use ethers::providers::Http;

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod utils;

/// Application state shared across all request handlers
pub struct AppState<P = Http> {
    /// Application configuration
    pub config: config::Config,
    /// Client for the upstream Ethereum node
    pub evm_client: blockchain::client::EvmClient<P>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            evm_client: self.evm_client.clone(),
        }
    }
}
