//! Client configuration
//!
//! Provides the settings an [`RpcClient`](super::RpcClient) needs:
//! - RPC endpoints per chain
//! - Default chain for requests without a chain ID
//! - Multicall3 deployment address
//! - Extra chain metadata for the native balance path

use std::collections::HashMap;
use alloy::primitives::Address;
use serde::Deserialize;
use crate::{
    types::{ChainConfigs, ChainInfo},
    utils::multicall_utils::MULTICALL3_ADDRESS,
};

/// Configuration parameters for [`RpcClient`](super::RpcClient)
///
/// Can be deserialized; missing fields take their defaults.
///
/// ```
/// use evm_balances::client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_rpc_url(1, "https://eth.llamarpc.com")
///     .with_rpc_url(137, "https://polygon-rpc.com")
///     .with_default_chain(137);
/// assert_eq!(config.rpc_url(137), Some("https://polygon-rpc.com"));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Chain used when a request carries no chain ID
    pub default_chain_id: u64,
    /// RPC endpoint per chain ID (`http(s)://` or `ws(s)://`)
    pub rpc_urls: HashMap<u64, String>,
    /// Multicall3 contract address
    pub multicall_address: Address,
    /// Optional chain metadata added to the built-in registry
    pub chains: Option<ChainConfigs>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rpc_url(mut self, chain_id: u64, rpc_url: impl Into<String>) -> Self {
        self.rpc_urls.insert(chain_id, rpc_url.into());
        self
    }

    pub fn with_default_chain(mut self, chain_id: u64) -> Self {
        self.default_chain_id = chain_id;
        self
    }

    pub fn with_multicall_address(mut self, address: Address) -> Self {
        self.multicall_address = address;
        self
    }

    pub fn with_chain(mut self, chain: ChainInfo) -> Self {
        self.chains.get_or_insert_with(ChainConfigs::new).insert(chain.id, chain);
        self
    }

    pub fn rpc_url(&self, chain_id: u64) -> Option<&str> {
        self.rpc_urls.get(&chain_id).map(String::as_str)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_chain_id: 1,
            rpc_urls: HashMap::new(),
            multicall_address: MULTICALL3_ADDRESS,
            chains: None,
        }
    }
}
