//! Balance fetching
//!
//! [`BalanceFetcher`] turns a [`BalanceRequest`] into normalized balance
//! records:
//! - No tokens: one native currency record read through a [`ChainClient`]
//! - Tokens: one record per token, read in a single multicall batch
//!
//! The batch is laid out as `balanceOf`, `decimals`, `symbol` for every token
//! in input order. Results are decoded by grouping the response into chunks of
//! [`CALLS_PER_TOKEN`] and mapping each chunk to one record.

use std::sync::Arc;
use log::{debug, warn};
use crate::{
    chains::ChainRegistry,
    client::{ClientConfig, RpcClient},
    errors::{FetchError, MulticallError},
    traits::{ChainClient, ChainConnection, MulticallExecutor},
    types::{
        BalanceReport, BalanceRequest, BalanceResult, CallOutcome, CallValue, ContractCall,
        Erc20Function, FailedToken, FetchOptions, ReadContracts, TokenBalance,
    },
    utils::{
        balance_utils::{format_balance, native_balance},
        erc20_utils::{build_balance_calls, CALLS_PER_TOKEN},
    },
};

/// Fetcher backed by a shared [`RpcClient`]
pub type RpcBalanceFetcher = BalanceFetcher<Arc<RpcClient>, Arc<RpcClient>>;

/// Fetches native and ERC20 balances
///
/// # Example
/// ```no_run
/// use evm_balances::{BalanceFetcher, BalanceRequest, ClientConfig};
/// use alloy::primitives::address;
///
/// # async fn example() -> anyhow::Result<()> {
/// let fetcher = BalanceFetcher::rpc(
///     ClientConfig::new().with_rpc_url(1, "https://eth.llamarpc.com"),
/// );
///
/// let holder = address!("28C6c06298d514Db089934071355E5743bf21d60");
/// let request = BalanceRequest::new(holder).tokens([
///     address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"), // USDC
///     address!("9f8F72aA9304c8B593d555F12eF6589cC3A579A2"), // MKR
/// ]);
///
/// for balance in fetcher.fetch_balances(request).await? {
///     println!("{} {}", balance.formatted(), balance.symbol());
/// }
/// # Ok(())
/// # }
/// ```
pub struct BalanceFetcher<C, M> {
    client: C,
    executor: M,
    chains: ChainRegistry,
    options: FetchOptions,
}

impl BalanceFetcher<Arc<RpcClient>, Arc<RpcClient>> {
    /// Build a fetcher whose chain client and executor share one [`RpcClient`]
    ///
    /// Chains listed in `config.chains` extend the built-in registry.
    pub fn rpc(config: ClientConfig) -> RpcBalanceFetcher {
        let client = Arc::new(RpcClient::new(config));
        let chains = match &client.config().chains {
            Some(chains) => ChainRegistry::known().extend(chains.clone()),
            None => ChainRegistry::known(),
        };
        BalanceFetcher::new(client.clone(), client).with_chains(chains)
    }
}

impl<C, M> BalanceFetcher<C, M>
where
    C: ChainClient,
    M: MulticallExecutor,
{
    pub fn new(client: C, executor: M) -> Self {
        Self {
            client,
            executor,
            chains: ChainRegistry::known(),
            options: FetchOptions::default(),
        }
    }

    pub fn with_chains(mut self, chains: ChainRegistry) -> Self {
        self.chains = chains;
        self
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetch balances for `request`
    ///
    /// Returns one native record when `request.tokens` is empty, otherwise
    /// one token record per token in input order. Tokens skipped under
    /// [`FetchOptions::allow_partial_failure`] are dropped; use
    /// [`fetch_report`](Self::fetch_report) to see them.
    pub async fn fetch_balances(&self, request: BalanceRequest) -> Result<Vec<BalanceResult>, FetchError> {
        Ok(self.fetch_report(request).await?.balances)
    }

    /// Fetch balances together with any tokens that were skipped
    pub async fn fetch_report(&self, request: BalanceRequest) -> Result<BalanceReport, FetchError> {
        if request.tokens.is_empty() {
            return self.fetch_native(&request).await;
        }

        let contracts = build_balance_calls(request.address, request.tokens.as_slice());
        debug!(
            "fetching {} token balances of {} ({} calls, chain {:?})",
            request.tokens.len(),
            request.address,
            contracts.len(),
            request.chain_id
        );

        let outcomes = self
            .executor
            .read_contracts(ReadContracts {
                chain_id: request.chain_id,
                allow_failure: self.options.allow_partial_failure,
                contracts: contracts.clone(),
            })
            .await?;

        decode_token_balances(&contracts, &outcomes, self.options.allow_partial_failure)
    }

    async fn fetch_native(&self, request: &BalanceRequest) -> Result<BalanceReport, FetchError> {
        let connection = self.client.connection(request.chain_id).await?;
        let value = connection.get_balance(request.address).await?;
        let chain_id = connection.chain_id();
        let currency = self.chains.find(chain_id).map(|chain| &chain.native_currency);
        debug!("native balance of {} on chain {chain_id}: {value}", request.address);

        Ok(BalanceReport {
            balances: vec![BalanceResult::Native(native_balance(value, currency))],
            failed: Vec::new(),
        })
    }
}

/// Decode a multicall response laid out by
/// [`build_balance_calls`](crate::utils::erc20_utils::build_balance_calls)
///
/// `outcomes` must align 1:1 with `contracts`. Each group of
/// [`CALLS_PER_TOKEN`] becomes one [`TokenBalance`], in group order.
///
/// A `Failure` in a group skips that token when `allow_partial_failure` is
/// set and fails the whole decode otherwise.
pub fn decode_token_balances(
    contracts: &[ContractCall],
    outcomes: &[CallOutcome],
    allow_partial_failure: bool,
) -> Result<BalanceReport, FetchError> {
    if outcomes.len() != contracts.len() || contracts.len() % CALLS_PER_TOKEN != 0 {
        return Err(MulticallError::LengthMismatch {
            expected: contracts.len(),
            actual: outcomes.len(),
        }
        .into());
    }

    let mut report = BalanceReport::default();
    let groups = contracts
        .chunks_exact(CALLS_PER_TOKEN)
        .zip(outcomes.chunks_exact(CALLS_PER_TOKEN));

    for (calls, results) in groups {
        match decode_group(calls, results)? {
            Ok(balance) => report.balances.push(BalanceResult::Token(balance)),
            Err(failed) if allow_partial_failure => {
                warn!("skipping {}: {} failed: {}", failed.token, failed.function, failed.reason);
                report.failed.push(failed);
            }
            Err(failed) => {
                return Err(MulticallError::CallFailed {
                    target: failed.token.to_string(),
                    function: failed.function.to_string(),
                    reason: failed.reason,
                }
                .into())
            }
        }
    }

    Ok(report)
}

/// Map one `[balanceOf, decimals, symbol]` group to a balance
///
/// The outer error is fatal (malformed response); the inner one is a token
/// whose call failed.
fn decode_group(
    calls: &[ContractCall],
    results: &[CallOutcome],
) -> Result<Result<TokenBalance, FailedToken>, FetchError> {
    let token = calls[0].address;

    if let Some((call, CallOutcome::Failure(reason))) = calls
        .iter()
        .zip(results)
        .find(|(_, outcome)| !outcome.is_success())
    {
        return Ok(Err(FailedToken {
            token,
            function: call.function_name(),
            reason: reason.clone(),
        }));
    }

    match results {
        [CallOutcome::Success(CallValue::Balance(value)), CallOutcome::Success(CallValue::Decimals(decimals)), CallOutcome::Success(CallValue::Symbol(symbol))] => {
            Ok(Ok(TokenBalance {
                token,
                value: *value,
                decimals: *decimals,
                symbol: symbol.to_string(),
                formatted: format_balance(*value, *decimals),
            }))
        }
        _ => {
            let position = results
                .iter()
                .zip(calls)
                .position(|(outcome, call)| !matches_function(outcome, call))
                .unwrap_or(0);
            Err(MulticallError::UnexpectedValue {
                target: token.to_string(),
                function: calls[position].function_name().to_string(),
            }
            .into())
        }
    }
}

fn matches_function(outcome: &CallOutcome, call: &ContractCall) -> bool {
    matches!(
        (outcome, call.function),
        (CallOutcome::Success(CallValue::Balance(_)), Erc20Function::BalanceOf(_))
            | (CallOutcome::Success(CallValue::Decimals(_)), Erc20Function::Decimals)
            | (CallOutcome::Success(CallValue::Symbol(_)), Erc20Function::Symbol)
    )
}
