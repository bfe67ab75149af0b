//! RPC-backed chain client
//!
//! [`RpcClient`] implements [`ChainClient`] and [`MulticallExecutor`] on top of
//! alloy providers. One provider is created per chain on first use and reused
//! afterwards.
//!
//! # Example
//! ```no_run
//! use evm_balances::{
//!     client::{ClientConfig, RpcClient},
//!     traits::{ChainClient, ChainConnection},
//! };
//! use alloy::primitives::address;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = RpcClient::new(ClientConfig::new().with_rpc_url(1, "https://eth.llamarpc.com"));
//! let connection = client.connection(None).await?;
//! let balance = connection
//!     .get_balance(address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"))
//!     .await?;
//! println!("{balance} wei on chain {}", connection.chain_id());
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;

pub use builder::{get_provider, AnyNetworkProvider};
pub use config::ClientConfig;

use std::collections::HashMap;
use alloy::{
    network::AnyNetwork,
    primitives::{Address, U256},
    providers::Provider,
};
use async_trait::async_trait;
use log::{debug, trace, warn};
use tokio::sync::RwLock;
use crate::{
    errors::{FetchError, InitError},
    traits::{ChainClient, ChainConnection, MulticallExecutor},
    types::{CallOutcome, ReadContracts},
    utils::multicall_utils::MulticallManager,
};

/// Chain client backed by JSON-RPC endpoints
pub struct RpcClient {
    config: ClientConfig,
    multicall: MulticallManager,
    /// Connections keyed by configured chain ID
    connections: RwLock<HashMap<u64, RpcConnection>>,
}

impl RpcClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            multicall: MulticallManager::new(config.multicall_address),
            config,
            connections: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Use `provider` for `chain_id` instead of connecting to the configured URL
    ///
    /// Replaces any cached connection for that chain. The provider is asked
    /// for its chain ID once, here.
    pub async fn register_provider(
        &self,
        chain_id: u64,
        provider: AnyNetworkProvider,
    ) -> Result<(), InitError> {
        let connection = RpcConnection::resolve(chain_id, provider).await?;
        self.connections.write().await.insert(chain_id, connection);
        Ok(())
    }

    /// Returns the cached connection for `chain_id`, connecting on first use
    ///
    /// The lock is not held while connecting, so a slow endpoint does not
    /// stall lookups for other chains.
    async fn connect(&self, chain_id: u64) -> Result<RpcConnection, InitError> {
        if let Some(connection) = self.connections.read().await.get(&chain_id) {
            trace!("reusing provider for chain {chain_id}");
            return Ok(connection.clone());
        }

        let rpc_url = self
            .config
            .rpc_url(chain_id)
            .ok_or(InitError::UnknownChain(chain_id))?;
        debug!("connecting to chain {chain_id}");
        let provider = get_provider(rpc_url).await?;
        let connection = RpcConnection::resolve(chain_id, provider).await?;

        // Another task may have connected meanwhile; keep the first entry
        let mut connections = self.connections.write().await;
        Ok(connections.entry(chain_id).or_insert(connection).clone())
    }

    fn resolve_chain_id(&self, chain_id: Option<u64>) -> u64 {
        chain_id.unwrap_or(self.config.default_chain_id)
    }
}

/// Connection to one chain through an [`RpcClient`]
#[derive(Clone)]
pub struct RpcConnection {
    /// Chain ID reported by the endpoint
    chain_id: u64,
    provider: AnyNetworkProvider,
}

impl RpcConnection {
    async fn resolve(configured: u64, provider: AnyNetworkProvider) -> Result<Self, InitError> {
        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| InitError::ChainId(format!("chain {configured}: {e}")))?;
        if chain_id != configured {
            warn!("endpoint configured for chain {configured} reports chain {chain_id}");
        }
        Ok(Self { chain_id, provider })
    }
}

#[async_trait]
impl ChainClient for RpcClient {
    type Connection = RpcConnection;

    async fn connection(&self, chain_id: Option<u64>) -> Result<RpcConnection, FetchError> {
        let chain_id = self.resolve_chain_id(chain_id);
        Ok(self.connect(chain_id).await?)
    }
}

#[async_trait]
impl ChainConnection for RpcConnection {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn get_balance(&self, address: Address) -> Result<U256, FetchError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| FetchError::Provider(format!("eth_getBalance for {address} failed: {e}")))
    }
}

#[async_trait]
impl MulticallExecutor for RpcClient {
    async fn read_contracts(&self, request: ReadContracts) -> Result<Vec<CallOutcome>, FetchError> {
        if request.contracts.is_empty() {
            return Ok(Vec::new());
        }
        let connection = self.connection(request.chain_id).await?;
        self.multicall
            .batch_call::<AnyNetwork, _>(&connection.provider, &request.contracts, request.allow_failure)
            .await
    }
}
