// src/config.rs

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use url::Url;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_RPC_URL: &str = "http://127.0.0.1:7545";
const DEFAULT_RPC_TIMEOUT_SECS: u64 = 15;
const DEFAULT_MAX_CONCURRENT_RPC: usize = 32;

// A struct to hold all configuration, loaded once at startup from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub host: String,
    pub port: u16,

    /// JSON-RPC endpoint of the single Ethereum-compatible node we proxy to
    pub eth_rpc_url: String,

    /// Upper bound on a single remote call
    pub rpc_timeout: Duration,
    /// Upper bound on remote calls in flight at once
    pub max_concurrent_rpc: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            eth_rpc_url: DEFAULT_RPC_URL.to_string(),
            rpc_timeout: Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS),
            max_concurrent_rpc: DEFAULT_MAX_CONCURRENT_RPC,
        }
    }
}

impl Config {
    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to
    /// defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().context("PORT must be a valid number")?,
            None => DEFAULT_PORT,
        };

        let eth_rpc_url = lookup("ETH_RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        let parsed = Url::parse(&eth_rpc_url)
            .with_context(|| format!("ETH_RPC_URL is not a valid URL: {}", eth_rpc_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("ETH_RPC_URL must use http or https, got {}", parsed.scheme());
        }

        let timeout_secs = match lookup("RPC_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("RPC_TIMEOUT_SECS must be a valid number")?,
            None => DEFAULT_RPC_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("RPC_TIMEOUT_SECS must be greater than zero");
        }

        let max_concurrent_rpc = match lookup("MAX_CONCURRENT_RPC") {
            Some(raw) => raw
                .parse::<usize>()
                .context("MAX_CONCURRENT_RPC must be a valid number")?,
            None => DEFAULT_MAX_CONCURRENT_RPC,
        };
        if max_concurrent_rpc == 0 {
            bail!("MAX_CONCURRENT_RPC must be greater than zero");
        }

        Ok(Config {
            host,
            port,
            eth_rpc_url,
            rpc_timeout: Duration::from_secs(timeout_secs),
            max_concurrent_rpc,
        })
    }
}
