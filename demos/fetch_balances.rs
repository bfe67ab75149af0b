//! Token balance example
//!
//! Fetches several ERC20 balances of one holder in a single Multicall3 batch
//! and prints them as a table. MKR is included because its `symbol()` returns
//! `bytes32` rather than `string`.
//!
//! Run with `RUST_LOG=evm_balances=debug` to see the batch layout.

use alloy::primitives::address;
use anyhow::Result;
use colored::*;
use evm_balances::{BalanceFetcher, BalanceRequest, ClientConfig, FetchOptions};
use prettytable::{row, Table};

const ETH_RPC_URL: &str = "https://eth.llamarpc.com";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    println!("{}", "🔍 Fetching ERC20 balances via Multicall3\n".cyan().bold());

    let fetcher = BalanceFetcher::rpc(ClientConfig::new().with_rpc_url(1, ETH_RPC_URL))
        .with_options(FetchOptions {
            allow_partial_failure: true,
        });

    // Binance hot wallet
    let holder = address!("28C6c06298d514Db089934071355E5743bf21d60");
    let tokens = vec![
        address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"), // USDC
        address!("dAC17F958D2ee523a2206206994597C13D831ec7"), // USDT
        address!("9f8F72aA9304c8B593d555F12eF6589cC3A579A2"), // MKR (bytes32 symbol)
        address!("000000000000000000000000000000000000dEaD"), // not a token
    ];
    println!("Holder: {holder}, {} tokens\n", tokens.len());

    let report = fetcher
        .fetch_report(BalanceRequest::new(holder).chain_id(1).tokens(tokens))
        .await?;

    let mut table = Table::new();
    table.add_row(row!["Token", "Symbol", "Decimals", "Raw value", "Balance"]);
    for balance in &report.balances {
        table.add_row(row![
            balance.token_label(),
            balance.symbol(),
            balance.decimals(),
            balance.value(),
            balance.formatted()
        ]);
    }
    table.printstd();

    for failed in &report.failed {
        println!(
            "{} {} ({} failed: {})",
            "⚠️  Skipped".yellow(),
            failed.token,
            failed.function,
            failed.reason
        );
    }

    println!("\n{}", "✅ Balance query completed!".green().bold());
    Ok(())
}
