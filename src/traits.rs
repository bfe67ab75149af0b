//! Collaborator traits used by the balance fetcher
//!
//! This module provides the seams between the fetcher and the network:
//! - `ChainClient`: resolve a connection for a chain
//! - `ChainConnection`: native balance lookup on a resolved chain
//! - `MulticallExecutor`: execute a batch of ERC20 reads in one round trip
//!
//! [`RpcClient`](crate::client::RpcClient) implements all three over alloy
//! providers; tests substitute in-memory implementations.

use std::sync::Arc;
use async_trait::async_trait;
use alloy::primitives::{Address, U256};
use crate::{
    errors::FetchError,
    types::{CallOutcome, ReadContracts},
};

/// Resolves network connections by chain ID
#[async_trait]
pub trait ChainClient: Send + Sync {
    type Connection: ChainConnection;

    /// Returns a connection for `chain_id`, or for the default chain if `None`
    async fn connection(&self, chain_id: Option<u64>) -> Result<Self::Connection, FetchError>;
}

/// A connection to a single chain
#[async_trait]
pub trait ChainConnection: Send + Sync {
    /// Chain ID this connection resolved to
    fn chain_id(&self) -> u64;

    /// Native currency balance of `address` in wei
    async fn get_balance(&self, address: Address) -> Result<U256, FetchError>;
}

/// Executes batched contract reads
///
/// Implementations must return exactly one outcome per requested call, in
/// request order. When `allow_failure` is false, any failed or undecodable
/// call must fail the whole batch with an error.
#[async_trait]
pub trait MulticallExecutor: Send + Sync {
    async fn read_contracts(&self, request: ReadContracts) -> Result<Vec<CallOutcome>, FetchError>;
}

#[async_trait]
impl<T: ChainClient + ?Sized> ChainClient for Arc<T> {
    type Connection = T::Connection;

    async fn connection(&self, chain_id: Option<u64>) -> Result<Self::Connection, FetchError> {
        (**self).connection(chain_id).await
    }
}

#[async_trait]
impl<T: MulticallExecutor + ?Sized> MulticallExecutor for Arc<T> {
    async fn read_contracts(&self, request: ReadContracts) -> Result<Vec<CallOutcome>, FetchError> {
        (**self).read_contracts(request).await
    }
}
