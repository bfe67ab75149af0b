//! Error types for balance queries
//!
//! This module defines the error hierarchy used across the crate:
//! - Provider initialization errors
//! - Multicall batch errors
//! - Token return-data decoding errors
//! - Error conversion and propagation

use thiserror::Error;

/// Top-level error type for balance fetching
///
/// Every failure of a fetch surfaces as exactly one `FetchError`; no partial
/// result list is ever returned alongside it.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Errors occurring while resolving a chain connection
    #[error("Failed to initialize provider: {0}")]
    Init(#[from] InitError),

    /// Errors occurring during the batched contract read
    #[error("Multicall error: {0}")]
    Multicall(#[from] MulticallError),

    /// Errors decoding token return data
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// RPC request failed outside of a multicall (e.g. `eth_getBalance`)
    #[error("Provider request failed: {0}")]
    Provider(String),
}

/// Initialization-specific errors
///
/// These errors occur while building or looking up a provider for a chain.
#[derive(Debug, Error)]
pub enum InitError {
    /// Invalid or malformed RPC URL
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    /// WebSocket connection establishment errors
    #[error("WebSocket connection failed: {0}")]
    WsConnection(String),

    /// No RPC endpoint is configured for the requested chain
    #[error("No RPC URL configured for chain {0}")]
    UnknownChain(u64),

    /// The endpoint did not answer `eth_chainId`
    #[error("Failed to query chain ID: {0}")]
    ChainId(String),
}

/// Errors from executing or interpreting a multicall batch
#[derive(Debug, Error)]
pub enum MulticallError {
    /// The `eth_call` to the Multicall3 contract failed
    #[error("Multicall transport failed: {0}")]
    Transport(String),

    /// The aggregate return data could not be decoded
    #[error("Failed to decode multicall result: {0}")]
    Decode(String),

    /// A call reverted while the batch required every call to succeed
    #[error("{function} on {target} reverted: {reason}")]
    CallReverted {
        target: String,
        function: String,
        reason: String,
    },

    /// The executor reported a failed call to a batch that does not allow failures
    #[error("{function} on {target} failed: {reason}")]
    CallFailed {
        target: String,
        function: String,
        reason: String,
    },

    /// The executor returned a different number of results than requested
    #[error("Expected {expected} call results, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The decoded value does not match the function it was returned for
    #[error("Unexpected value returned by {function} on {target}")]
    UnexpectedValue { target: String, function: String },
}

/// Token-specific errors
///
/// These errors occur while decoding the return data of ERC20 read calls.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Failed to decode `balanceOf` return data
    ///
    /// # Fields
    /// * `address` - Token contract address
    /// * `reason` - Detailed error message
    #[error("Failed to decode token balance for {address}: {reason}")]
    BalanceDecode { address: String, reason: String },

    /// Failed to decode `decimals` return data
    ///
    /// # Fields
    /// * `address` - Token contract address
    /// * `reason` - Detailed error message
    #[error("Failed to decode token decimals for {address}: {reason}")]
    DecimalsDecode { address: String, reason: String },

    /// `symbol` return data is neither a string nor a bytes32
    ///
    /// # Fields
    /// * `address` - Token contract address
    /// * `reason` - Detailed error message
    #[error("Failed to decode token symbol for {address}: {reason}")]
    SymbolDecode { address: String, reason: String },
}
