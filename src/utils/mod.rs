//! Utility functions for ERC20 balance queries
//!
//! # Modules
//!
//! - [`erc20_utils`]: ERC20 call building and return decoding
//!   - `balanceOf` / `decimals` / `symbol` batch construction
//!   - `string` / `bytes32` symbol decoding
//!
//! - [`multicall_utils`]: Multicall3 batching
//!   - `aggregate3` encoding and decoding
//!   - Per-call failure handling
//!
//! - [`balance_utils`]: Balance formatting
//!   - Unit scaling
//!   - Native currency records
//!
//! # Example
//!
//! ```no_run
//! use evm_balances::{
//!     client::get_provider,
//!     utils::{erc20_utils, multicall_utils::MulticallManager},
//! };
//! use alloy::{network::AnyNetwork, primitives::address};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = get_provider("https://eth.llamarpc.com").await?;
//! let owner = address!("28C6c06298d514Db089934071355E5743bf21d60");
//! let usdc = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
//!
//! let calls = erc20_utils::build_balance_calls(owner, &[usdc]);
//! let outcomes = MulticallManager::default()
//!     .batch_call::<AnyNetwork, _>(&provider, &calls, false).await?;
//! println!("{outcomes:?}");
//! # Ok(())
//! # }
//! ```

/// ERC20 call building and decoding utilities
pub mod erc20_utils;

/// Multicall utilities for batch contract calls
pub mod multicall_utils;

/// Balance formatting utilities
pub mod balance_utils;
