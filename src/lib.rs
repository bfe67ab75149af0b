//! # EVM Balances
//!
//! Batched native and ERC20 balance queries across EVM chains.
//!
//! ## Core Features
//!
//! - **Token Balances**
//!   - `balanceOf`, `decimals` and `symbol` for any number of tokens in one
//!     Multicall3 round trip
//!   - `bytes32` symbol support for older tokens
//!   - All-or-nothing by default, optional partial failure
//!
//! - **Native Balances**
//!   - Chain-aware currency metadata (name, symbol, decimals)
//!   - ETH-like fallbacks for unknown chains
//!
//! - **Normalized Results**
//!   - Raw `U256` value, decimals, symbol and formatted string for every record
//!   - Distinct native and token record shapes
//!
//! ## Features
//!
//! - `rustls-tls`: Uses rustls as the TLS implementation instead of native-tls (OpenSSL).
//!   This is useful for environments where OpenSSL is not available or not desired.
//!
//!   Usage example:
//!   ```toml
//!   [dependencies]
//!   evm-balances = { version = "0.1.0", default-features = false, features = ["rustls-tls"] }
//!   ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use evm_balances::{BalanceFetcher, BalanceRequest, BalanceResult, ClientConfig};
//! use alloy::primitives::address;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::new()
//!     .with_rpc_url(1, "https://eth.llamarpc.com")
//!     .with_rpc_url(137, "https://polygon-rpc.com");
//! let fetcher = BalanceFetcher::rpc(config);
//!
//! let holder = address!("28C6c06298d514Db089934071355E5743bf21d60");
//!
//! // Native balance on Polygon
//! let native = fetcher.fetch_balances(BalanceRequest::new(holder).chain_id(137)).await?;
//! println!("{} {}", native[0].formatted(), native[0].symbol());
//!
//! // USDC on mainnet
//! let tokens = fetcher
//!     .fetch_balances(
//!         BalanceRequest::new(holder)
//!             .tokens(address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")),
//!     )
//!     .await?;
//! if let BalanceResult::Token(usdc) = &tokens[0] {
//!     println!("{}: {} {}", usdc.token, usdc.formatted, usdc.symbol);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - `fetcher`: Balance fetching and multicall response decoding
//! - `client`: alloy-backed chain client and configuration
//! - `chains`: Known chain metadata
//! - `types`: Core data structures and type definitions
//! - `traits`: Collaborator traits for chain access and batching
//! - `errors`: Error types and handling
//! - `utils`: ERC20, Multicall3 and formatting helpers

pub mod types;
pub mod chains;
pub mod client;
pub mod fetcher;
pub mod utils;
pub mod traits;
pub mod errors;

// Re-export only the essential types and functions
pub use client::{ClientConfig, RpcClient};
pub use fetcher::{BalanceFetcher, RpcBalanceFetcher};
pub use types::{BalanceReport, BalanceRequest, BalanceResult, FetchOptions, NativeBalance, TokenBalance, Tokens};
pub use errors::FetchError;
pub use traits::{ChainClient, ChainConnection, MulticallExecutor};
