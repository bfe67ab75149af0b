// tests/common/mod.rs
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use evm_balances::{
    errors::{FetchError, InitError, MulticallError},
    traits::{ChainClient, ChainConnection, MulticallExecutor},
    types::{CallOutcome, Erc20Function, ReadContracts},
    utils::multicall_utils::{collect_outcomes, Call3Result},
    BalanceFetcher,
};

/// `symbol()` encoding used by a mock token
pub enum MockSymbol {
    Text(&'static str),
    Bytes32(&'static str),
}

pub struct MockToken {
    pub balances: HashMap<Address, U256>,
    pub decimals: u8,
    pub symbol: MockSymbol,
}

impl MockToken {
    pub fn new(decimals: u8, symbol: MockSymbol) -> Self {
        Self {
            balances: HashMap::new(),
            decimals,
            symbol,
        }
    }

    pub fn with_balance(mut self, holder: Address, value: U256) -> Self {
        self.balances.insert(holder, value);
        self
    }
}

/// In-memory chain answering native balance and ERC20 reads
pub struct MockChain {
    pub chain_id: u64,
    pub native: HashMap<Address, U256>,
    pub tokens: HashMap<Address, MockToken>,
    /// `(token, function name)` pairs that revert
    pub reverts: Vec<(Address, &'static str)>,
    /// Fail every batch at the transport level
    pub transport_down: bool,
    pub requests: Mutex<Vec<ReadContracts>>,
}

impl MockChain {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            native: HashMap::new(),
            tokens: HashMap::new(),
            reverts: Vec::new(),
            transport_down: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_native(mut self, holder: Address, value: U256) -> Self {
        self.native.insert(holder, value);
        self
    }

    pub fn with_token(mut self, address: Address, token: MockToken) -> Self {
        self.tokens.insert(address, token);
        self
    }

    pub fn with_revert(mut self, token: Address, function: &'static str) -> Self {
        self.reverts.push((token, function));
        self
    }

    pub fn into_fetcher(self) -> (Arc<MockChain>, BalanceFetcher<Arc<MockChain>, Arc<MockChain>>) {
        let chain = Arc::new(self);
        let fetcher = BalanceFetcher::new(chain.clone(), chain.clone());
        (chain, fetcher)
    }

    pub fn recorded_requests(&self) -> Vec<ReadContracts> {
        self.requests.lock().unwrap().clone()
    }

    fn execute(&self, token: Address, function: Erc20Function) -> Call3Result {
        let reverted = Call3Result {
            success: false,
            returnData: Default::default(),
        };
        if self.reverts.contains(&(token, function.name())) {
            return reverted;
        }
        let Some(state) = self.tokens.get(&token) else {
            return reverted;
        };

        let data = match function {
            Erc20Function::BalanceOf(owner) => {
                encode_word(state.balances.get(&owner).copied().unwrap_or_default())
            }
            Erc20Function::Decimals => encode_word(U256::from(state.decimals)),
            Erc20Function::Symbol => match state.symbol {
                MockSymbol::Text(symbol) => encode_string(symbol),
                MockSymbol::Bytes32(symbol) => B256::right_padding_from(symbol.as_bytes()).to_vec(),
            },
        };
        Call3Result {
            success: true,
            returnData: data.into(),
        }
    }
}

pub struct MockConnection {
    chain_id: u64,
    native: HashMap<Address, U256>,
}

#[async_trait]
impl ChainClient for MockChain {
    type Connection = MockConnection;

    async fn connection(&self, chain_id: Option<u64>) -> Result<MockConnection, FetchError> {
        match chain_id {
            Some(id) if id != self.chain_id => Err(InitError::UnknownChain(id).into()),
            _ => Ok(MockConnection {
                chain_id: self.chain_id,
                native: self.native.clone(),
            }),
        }
    }
}

#[async_trait]
impl ChainConnection for MockConnection {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn get_balance(&self, address: Address) -> Result<U256, FetchError> {
        Ok(self.native.get(&address).copied().unwrap_or_default())
    }
}

#[async_trait]
impl MulticallExecutor for MockChain {
    async fn read_contracts(&self, request: ReadContracts) -> Result<Vec<CallOutcome>, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.transport_down {
            return Err(MulticallError::Transport("connection refused".into()).into());
        }
        if let Some(id) = request.chain_id {
            if id != self.chain_id {
                return Err(InitError::UnknownChain(id).into());
            }
        }

        let results = request
            .contracts
            .iter()
            .map(|call| self.execute(call.address, call.function))
            .collect();
        collect_outcomes(&request.contracts, results, request.allow_failure)
    }
}

/// ABI-encode a single static word
pub fn encode_word(value: U256) -> Vec<u8> {
    value.to_be_bytes::<32>().to_vec()
}

/// ABI-encode a single dynamic string return value
pub fn encode_string(value: &str) -> Vec<u8> {
    let mut out = encode_word(U256::from(32));
    out.extend(encode_word(U256::from(value.len())));
    let mut data = value.as_bytes().to_vec();
    data.resize(value.len().div_ceil(32) * 32, 0);
    out.extend(data);
    out
}

/// `amount * 10^decimals`
pub fn units(amount: u64, decimals: u8) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(decimals))
}
