//! Core types for balance queries
//!
//! This module defines the data structures shared by the fetcher and its collaborators:
//! - Balance requests and token lists
//! - Contract call descriptors and decoded call values
//! - Native and token balance records
//! - Chain metadata

use std::{collections::HashMap, fmt};
use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// Placeholder identity used when a chain's native currency name is unknown
pub const NATIVE_TOKEN_ADDRESS: Address = Address::ZERO;

/// Mapping of chain IDs to their metadata
pub type ChainConfigs = HashMap<u64, ChainInfo>;

/// Native currency of a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    /// Display name (e.g., "Ether")
    pub name: String,
    /// Ticker symbol (e.g., "ETH")
    pub symbol: String,
    /// Number of decimal places
    pub decimals: u8,
}

/// Metadata for a known chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    /// Chain ID
    pub id: u64,
    /// Human readable network name
    pub name: String,
    /// Native currency of the chain
    pub native_currency: NativeCurrency,
}

/// Token contracts to query, normalized to an ordered list
///
/// A single address and a one-element list are the same request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens(Vec<Address>);

impl Tokens {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[Address] {
        &self.0
    }
}

impl From<Address> for Tokens {
    fn from(token: Address) -> Self {
        Self(vec![token])
    }
}

impl From<Option<Address>> for Tokens {
    fn from(token: Option<Address>) -> Self {
        Self(token.into_iter().collect())
    }
}

impl From<Vec<Address>> for Tokens {
    fn from(tokens: Vec<Address>) -> Self {
        Self(tokens)
    }
}

impl From<&[Address]> for Tokens {
    fn from(tokens: &[Address]) -> Self {
        Self(tokens.to_vec())
    }
}

impl<const N: usize> From<[Address; N]> for Tokens {
    fn from(tokens: [Address; N]) -> Self {
        Self(tokens.to_vec())
    }
}

/// Parameters for a balance query
#[derive(Debug, Clone)]
pub struct BalanceRequest {
    /// Account whose balances are queried
    pub address: Address,
    /// Chain to query; `None` uses the client's default chain
    pub chain_id: Option<u64>,
    /// ERC20 contracts; empty means the native currency
    pub tokens: Tokens,
}

impl BalanceRequest {
    /// Native balance request on the default chain
    pub fn new(address: Address) -> Self {
        Self {
            address,
            chain_id: None,
            tokens: Tokens::default(),
        }
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn tokens(mut self, tokens: impl Into<Tokens>) -> Self {
        self.tokens = tokens.into();
        self
    }
}

/// ERC20 read-only functions used for balance queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Erc20Function {
    /// `balanceOf(owner)`
    BalanceOf(Address),
    /// `decimals()`
    Decimals,
    /// `symbol()`
    Symbol,
}

impl Erc20Function {
    /// Solidity function name
    pub fn name(&self) -> &'static str {
        match self {
            Self::BalanceOf(_) => "balanceOf",
            Self::Decimals => "decimals",
            Self::Symbol => "symbol",
        }
    }
}

/// A single contract read in a multicall batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractCall {
    /// Token contract address
    pub address: Address,
    /// Function to call
    pub function: Erc20Function,
}

impl ContractCall {
    pub fn new(address: Address, function: Erc20Function) -> Self {
        Self { address, function }
    }

    pub fn function_name(&self) -> &'static str {
        self.function.name()
    }
}

/// Request passed to a [`MulticallExecutor`](crate::traits::MulticallExecutor)
#[derive(Debug, Clone)]
pub struct ReadContracts {
    /// Chain to execute on; `None` uses the default chain
    pub chain_id: Option<u64>,
    /// When false, any failed call fails the whole batch
    pub allow_failure: bool,
    /// Calls in execution order
    pub contracts: Vec<ContractCall>,
}

/// `symbol()` return value
///
/// Most tokens return a dynamic `string`, some older ones (e.g. MKR) a
/// null-padded `bytes32`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolValue {
    Text(String),
    Bytes32(B256),
}

impl fmt::Display for SymbolValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Bytes32(word) => {
                let bytes = word.as_slice();
                let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
                f.write_str(&String::from_utf8_lossy(&bytes[..end]))
            }
        }
    }
}

/// Decoded return value of an ERC20 read call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallValue {
    Balance(U256),
    Decimals(u8),
    Symbol(SymbolValue),
}

/// Result of one call in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Success(CallValue),
    /// Only produced when the batch allows failures
    Failure(String),
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success(_))
    }
}

/// Balance of an ERC20 token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenBalance {
    /// Token contract address
    pub token: Address,
    /// Raw balance in the token's smallest unit
    pub value: U256,
    /// Number of decimal places
    pub decimals: u8,
    /// Token symbol
    pub symbol: String,
    /// `value` scaled by `decimals`
    pub formatted: String,
}

/// Balance of a chain's native currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeBalance {
    /// Currency name when the chain is known
    pub currency_name: Option<String>,
    /// Raw balance in wei
    pub value: U256,
    /// Number of decimal places
    pub decimals: u8,
    /// Currency symbol
    pub symbol: String,
    /// `value` scaled by `decimals`
    pub formatted: String,
}

/// A normalized balance record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BalanceResult {
    Native(NativeBalance),
    Token(TokenBalance),
}

impl BalanceResult {
    pub fn value(&self) -> U256 {
        match self {
            Self::Native(native) => native.value,
            Self::Token(token) => token.value,
        }
    }

    pub fn decimals(&self) -> u8 {
        match self {
            Self::Native(native) => native.decimals,
            Self::Token(token) => token.decimals,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Self::Native(native) => &native.symbol,
            Self::Token(token) => &token.symbol,
        }
    }

    pub fn formatted(&self) -> &str {
        match self {
            Self::Native(native) => &native.formatted,
            Self::Token(token) => &token.formatted,
        }
    }

    /// Contract address, `None` for the native currency
    pub fn token_address(&self) -> Option<Address> {
        match self {
            Self::Native(_) => None,
            Self::Token(token) => Some(token.token),
        }
    }

    /// Flat `token` label: contract address for tokens, currency name (or the
    /// zero address when unknown) for the native currency
    pub fn token_label(&self) -> String {
        match self {
            Self::Native(native) => native
                .currency_name
                .clone()
                .unwrap_or_else(|| NATIVE_TOKEN_ADDRESS.to_string()),
            Self::Token(token) => token.token.to_string(),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }
}

/// Token skipped because one of its calls failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedToken {
    pub token: Address,
    pub function: &'static str,
    pub reason: String,
}

/// Balances plus any tokens skipped under partial failure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    pub balances: Vec<BalanceResult>,
    pub failed: Vec<FailedToken>,
}

/// Fetcher behavior switches
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Skip tokens whose calls fail instead of failing the whole fetch
    pub allow_partial_failure: bool,
}
