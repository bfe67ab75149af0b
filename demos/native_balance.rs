//! Native balance example
//!
//! Queries the native currency balance of one address on several chains
//! concurrently. Configuration is loaded from JSON the way an application
//! would read it from a file.

use alloy::primitives::address;
use anyhow::Result;
use colored::*;
use evm_balances::{BalanceFetcher, BalanceRequest, ClientConfig};
use futures::future::join_all;

const CONFIG: &str = r#"{
    "default_chain_id": 1,
    "rpc_urls": {
        "1": "https://eth.llamarpc.com",
        "56": "https://bsc-dataseed.bnbchain.org",
        "137": "https://polygon-rpc.com"
    }
}"#;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    println!("{}", "🔍 Fetching native balances across chains\n".cyan().bold());

    let config: ClientConfig = serde_json::from_str(CONFIG)?;
    let mut chain_ids: Vec<u64> = config.rpc_urls.keys().copied().collect();
    chain_ids.sort_unstable();
    let fetcher = BalanceFetcher::rpc(config);

    let holder = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
    println!("Holder: {holder}\n");

    let results = join_all(
        chain_ids
            .iter()
            .map(|&chain_id| fetcher.fetch_balances(BalanceRequest::new(holder).chain_id(chain_id))),
    )
    .await;

    for (chain_id, result) in chain_ids.iter().zip(results) {
        match result {
            Ok(balances) => {
                for balance in balances {
                    println!(
                        "chain {:>5}: {} {} ({})",
                        chain_id,
                        balance.formatted().green(),
                        balance.symbol(),
                        balance.token_label()
                    );
                }
            }
            Err(e) => println!("chain {:>5}: {}", chain_id, e.to_string().red()),
        }
    }

    Ok(())
}
