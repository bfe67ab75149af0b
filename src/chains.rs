//! Registry of known chains and their native currencies
//!
//! Used by the native balance path to resolve decimals, symbol and currency
//! name from a chain ID. Unknown chains are not an error; callers fall back to
//! ETH-like defaults.

use once_cell::sync::Lazy;
use crate::types::{ChainConfigs, ChainInfo, NativeCurrency};

fn chain(id: u64, name: &str, currency: &str, symbol: &str, decimals: u8) -> (u64, ChainInfo) {
    (
        id,
        ChainInfo {
            id,
            name: name.into(),
            native_currency: NativeCurrency {
                name: currency.into(),
                symbol: symbol.into(),
                decimals,
            },
        },
    )
}

/// Built-in chain metadata
static KNOWN_CHAINS: Lazy<ChainConfigs> = Lazy::new(|| {
    [
        chain(1, "Ethereum", "Ether", "ETH", 18),
        chain(5, "Goerli", "Goerli Ether", "ETH", 18),
        chain(10, "Optimism", "Ether", "ETH", 18),
        chain(56, "BNB Smart Chain", "BNB", "BNB", 18),
        chain(100, "Gnosis", "xDAI", "xDAI", 18),
        chain(137, "Polygon", "MATIC", "MATIC", 18),
        chain(250, "Fantom", "Fantom", "FTM", 18),
        chain(324, "zkSync Era", "Ether", "ETH", 18),
        chain(8453, "Base", "Ether", "ETH", 18),
        chain(42161, "Arbitrum One", "Ether", "ETH", 18),
        chain(42220, "Celo", "CELO", "CELO", 18),
        chain(43114, "Avalanche", "Avalanche", "AVAX", 18),
        chain(59144, "Linea", "Linea Ether", "ETH", 18),
        chain(80001, "Polygon Mumbai", "MATIC", "MATIC", 18),
        chain(11155111, "Sepolia", "Sepolia Ether", "SEP", 18),
    ]
    .into_iter()
    .collect()
});

/// Lookup table of chain metadata
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    chains: ChainConfigs,
}

impl ChainRegistry {
    /// Registry containing the built-in chains
    pub fn known() -> Self {
        Self {
            chains: KNOWN_CHAINS.clone(),
        }
    }

    /// Registry with no entries; every lookup falls back to defaults
    pub fn empty() -> Self {
        Self {
            chains: ChainConfigs::new(),
        }
    }

    /// Adds or replaces chain entries
    pub fn extend(mut self, chains: ChainConfigs) -> Self {
        self.chains.extend(chains);
        self
    }

    pub fn insert(&mut self, chain: ChainInfo) {
        self.chains.insert(chain.id, chain);
    }

    pub fn find(&self, chain_id: u64) -> Option<&ChainInfo> {
        self.chains.get(&chain_id)
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::known()
    }
}
