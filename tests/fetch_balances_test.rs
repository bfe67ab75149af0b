//! Integration tests for balance fetching
//!
//! Runs the fetcher against an in-memory chain. Token return data is ABI
//! encoded by the mock and decoded through the same Multicall3 result path
//! the RPC client uses.
//!
//! # Test Coverage
//! - Call batch layout and token ordering
//! - Single token vs token list requests
//! - `bytes32` symbol fallback
//! - All-or-nothing failure and partial failure mode
//! - Native currency records for known and unknown chains
//! - Concurrent independent fetches

mod common;

use alloy::primitives::{address, utils::parse_units, Address, U256};
use anyhow::Result;
use common::{units, MockChain, MockSymbol, MockToken};
use evm_balances::{
    chains::ChainRegistry,
    errors::{FetchError, InitError, MulticallError},
    types::{ChainInfo, Erc20Function, NativeCurrency},
    BalanceRequest, BalanceResult, FetchOptions,
};
use futures::future::join_all;

const HOLDER: Address = address!("28C6c06298d514Db089934071355E5743bf21d60");
const OTHER_HOLDER: Address = address!("21a31Ee1afC51d94C2eFcCAa2092aD1028285549");
const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
const USDT: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
const MKR: Address = address!("9f8F72aA9304c8B593d555F12eF6589cC3A579A2");
const UNKNOWN_CHAIN: u64 = 31337;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mainnet() -> MockChain {
    MockChain::new(1)
        .with_native(HOLDER, units(3, 18) / U256::from(2))
        .with_token(
            USDC,
            MockToken::new(6, MockSymbol::Text("USDC"))
                .with_balance(HOLDER, U256::from(1_234_560_000u64))
                .with_balance(OTHER_HOLDER, units(7, 6)),
        )
        .with_token(
            USDT,
            MockToken::new(6, MockSymbol::Text("USDT")).with_balance(HOLDER, units(42, 6)),
        )
        .with_token(
            MKR,
            MockToken::new(18, MockSymbol::Bytes32("MKR")).with_balance(HOLDER, units(5, 17)),
        )
}

fn token_balance(result: &BalanceResult) -> &evm_balances::TokenBalance {
    match result {
        BalanceResult::Token(balance) => balance,
        BalanceResult::Native(native) => panic!("expected token balance, got {native:?}"),
    }
}

#[tokio::test]
async fn test_token_balances_follow_input_order() -> Result<()> {
    init_logger();
    let (chain, fetcher) = mainnet().into_fetcher();
    let tokens = vec![USDT, USDC, MKR];

    let balances = fetcher
        .fetch_balances(BalanceRequest::new(HOLDER).chain_id(1).tokens(tokens.clone()))
        .await?;

    assert_eq!(balances.len(), tokens.len());
    for (balance, token) in balances.iter().zip(&tokens) {
        assert_eq!(balance.token_address(), Some(*token));
        assert_eq!(balance.token_label(), token.to_string());
    }

    let usdt = token_balance(&balances[0]);
    assert_eq!((usdt.symbol.as_str(), usdt.decimals, usdt.formatted.as_str()), ("USDT", 6, "42.0"));
    let usdc = token_balance(&balances[1]);
    assert_eq!(usdc.value, U256::from(1_234_560_000u64));
    assert_eq!(usdc.formatted, "1234.56");

    // One batch, three calls per token in fixed order
    let requests = chain.recorded_requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.chain_id, Some(1));
    assert!(!request.allow_failure);
    assert_eq!(request.contracts.len(), 3 * tokens.len());
    for (group, token) in request.contracts.chunks(3).zip(&tokens) {
        assert!(group.iter().all(|call| call.address == *token));
        assert_eq!(group[0].function, Erc20Function::BalanceOf(HOLDER));
        assert_eq!(group[1].function, Erc20Function::Decimals);
        assert_eq!(group[2].function, Erc20Function::Symbol);
    }
    Ok(())
}

#[tokio::test]
async fn test_single_token_matches_list() -> Result<()> {
    let (_, fetcher) = mainnet().into_fetcher();

    let single = fetcher.fetch_balances(BalanceRequest::new(HOLDER).tokens(USDC)).await?;
    let list = fetcher.fetch_balances(BalanceRequest::new(HOLDER).tokens(vec![USDC])).await?;

    assert_eq!(single, list);
    assert_eq!(single.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_bytes32_symbol_is_decoded() -> Result<()> {
    init_logger();
    let (_, fetcher) = mainnet().into_fetcher();

    let balances = fetcher
        .fetch_balances(BalanceRequest::new(HOLDER).tokens([USDC, MKR]))
        .await?;

    let mkr = token_balance(&balances[1]);
    assert_eq!(mkr.symbol, "MKR");
    assert_eq!(mkr.formatted, "0.5");
    assert_eq!(token_balance(&balances[0]).symbol, "USDC");
    Ok(())
}

#[tokio::test]
async fn test_formatted_parses_back_to_value() -> Result<()> {
    let (_, fetcher) = mainnet().into_fetcher();

    let balances = fetcher
        .fetch_balances(BalanceRequest::new(HOLDER).tokens([USDC, USDT, MKR]))
        .await?;

    for balance in balances {
        let parsed = parse_units(balance.formatted(), balance.decimals())?.get_absolute();
        assert_eq!(parsed, balance.value(), "{}", balance.formatted());
    }
    Ok(())
}

#[tokio::test]
async fn test_single_failed_call_fails_whole_fetch() {
    init_logger();
    let (_, fetcher) = mainnet().with_revert(USDT, "symbol").into_fetcher();

    let result = fetcher
        .fetch_balances(BalanceRequest::new(HOLDER).tokens([USDC, USDT]))
        .await;

    match result {
        Err(FetchError::Multicall(MulticallError::CallReverted { target, function, .. })) => {
            assert_eq!(target, USDT.to_string());
            assert_eq!(function, "symbol");
        }
        other => panic!("expected the whole fetch to fail, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let mut chain = mainnet();
    chain.transport_down = true;
    let (_, fetcher) = chain.into_fetcher();

    let err = fetcher
        .fetch_balances(BalanceRequest::new(HOLDER).tokens(USDC))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Multicall(MulticallError::Transport(_))));
}

#[tokio::test]
async fn test_partial_failure_skips_failed_tokens() -> Result<()> {
    init_logger();
    let unknown = address!("000000000000000000000000000000000000dEaD");
    let (chain, fetcher) = mainnet().with_revert(USDT, "decimals").into_fetcher();
    let fetcher = fetcher.with_options(FetchOptions {
        allow_partial_failure: true,
    });

    let report = fetcher
        .fetch_report(BalanceRequest::new(HOLDER).tokens([USDC, USDT, unknown, MKR]))
        .await?;

    let fetched: Vec<_> = report.balances.iter().filter_map(BalanceResult::token_address).collect();
    assert_eq!(fetched, vec![USDC, MKR]);
    let failed: Vec<_> = report.failed.iter().map(|f| (f.token, f.function)).collect();
    assert_eq!(failed, vec![(USDT, "decimals"), (unknown, "balanceOf")]);
    assert!(chain.recorded_requests()[0].allow_failure);
    Ok(())
}

#[tokio::test]
async fn test_native_balance_on_unknown_chain_uses_defaults() -> Result<()> {
    let value = U256::from(1_500_000_000_000_000_000u128);
    let (chain, fetcher) = MockChain::new(UNKNOWN_CHAIN).with_native(HOLDER, value).into_fetcher();

    let balances = fetcher.fetch_balances(BalanceRequest::new(HOLDER)).await?;

    assert_eq!(balances.len(), 1);
    let native = match &balances[0] {
        BalanceResult::Native(native) => native,
        other => panic!("expected native balance, got {other:?}"),
    };
    assert_eq!(native.value, value);
    assert_eq!(native.decimals, 18);
    assert_eq!(native.symbol, "ETH");
    assert_eq!(native.formatted, "1.5");
    assert_eq!(native.currency_name, None);
    assert_eq!(balances[0].token_label(), Address::ZERO.to_string());
    // The native path never touches the multicall executor
    assert!(chain.recorded_requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_native_balance_uses_chain_metadata() -> Result<()> {
    let (_, fetcher) = MockChain::new(56).with_native(HOLDER, units(2, 18)).into_fetcher();

    let balances = fetcher.fetch_balances(BalanceRequest::new(HOLDER).chain_id(56)).await?;

    assert_eq!(balances[0].symbol(), "BNB");
    assert_eq!(balances[0].token_label(), "BNB");
    assert_eq!(balances[0].formatted(), "2.0");
    assert_eq!(balances[0].token_address(), None);
    Ok(())
}

#[tokio::test]
async fn test_native_balance_with_custom_registry() -> Result<()> {
    let (_, fetcher) = MockChain::new(UNKNOWN_CHAIN).with_native(HOLDER, units(3, 6)).into_fetcher();
    let mut chains = ChainRegistry::empty();
    chains.insert(ChainInfo {
        id: UNKNOWN_CHAIN,
        name: "Devnet".into(),
        native_currency: NativeCurrency {
            name: "Dev Coin".into(),
            symbol: "DEV".into(),
            decimals: 6,
        },
    });
    let fetcher = fetcher.with_chains(chains);

    let balances = fetcher.fetch_balances(BalanceRequest::new(HOLDER)).await?;

    assert_eq!(balances[0].decimals(), 6);
    assert_eq!(balances[0].symbol(), "DEV");
    assert_eq!(balances[0].token_label(), "Dev Coin");
    assert_eq!(balances[0].formatted(), "3.0");
    Ok(())
}

#[tokio::test]
async fn test_unknown_chain_id_is_rejected() {
    let (_, fetcher) = mainnet().into_fetcher();

    let native = fetcher.fetch_balances(BalanceRequest::new(HOLDER).chain_id(10)).await;
    assert!(matches!(native, Err(FetchError::Init(InitError::UnknownChain(10)))));

    let tokens = fetcher
        .fetch_balances(BalanceRequest::new(HOLDER).chain_id(10).tokens(USDC))
        .await;
    assert!(matches!(tokens, Err(FetchError::Init(InitError::UnknownChain(10)))));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_fetches_are_independent() -> Result<()> {
    let (chain, fetcher) = mainnet().into_fetcher();

    let requests = vec![
        BalanceRequest::new(HOLDER).tokens(USDC),
        BalanceRequest::new(OTHER_HOLDER).tokens(USDC),
        BalanceRequest::new(HOLDER),
        BalanceRequest::new(OTHER_HOLDER).tokens([USDT, MKR]),
    ];
    let results = join_all(requests.into_iter().map(|request| fetcher.fetch_balances(request))).await;

    let results = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    assert_eq!(results[0][0].formatted(), "1234.56");
    assert_eq!(results[1][0].formatted(), "7.0");
    assert_eq!(results[2][0].formatted(), "1.5");
    assert_eq!(results[3][0].value(), U256::ZERO);
    assert_eq!(results[3][1].value(), U256::ZERO);
    assert_eq!(chain.recorded_requests().len(), 3);
    Ok(())
}
