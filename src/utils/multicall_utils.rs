//! Multicall utilities for batch contract calls
//!
//! This module batches ERC20 reads through the canonical Multicall3 contract,
//! which is deployed at the same address on most EVM chains.
//!
//! Key features:
//! - One `eth_call` per batch via `aggregate3`
//! - Per-call `allowFailure` so a batch can be all-or-nothing or tolerant
//! - Return data decoded per called function into [`CallOutcome`]s

use alloy::{
    network::{Network, TransactionBuilder},
    primitives::{address, Address, Bytes},
    providers::Provider,
    sol_types::{decode_revert_reason, SolCall},
};
use crate::{
    errors::{FetchError, MulticallError},
    types::{CallOutcome, ContractCall},
    utils::erc20_utils::{decode_call_return, encode_call},
};

/// Canonical Multicall3 deployment address
pub const MULTICALL3_ADDRESS: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

// Multicall3 interface - standard and widely supported

mod multicall3 {
    use alloy::sol;

    sol! {
        #[derive(Debug)]
        struct Call3 {
            address target;
            bool allowFailure;
            bytes callData;
        }

        #[derive(Debug)]
        struct Call3Result {
            bool success;
            bytes returnData;
        }

        contract Multicall3 {
            function aggregate3(Call3[] calldata calls)
                public payable
                returns (Call3Result[] memory returnData);
        }
    }
}

pub use multicall3::{Call3, Call3Result};
use multicall3::Multicall3::aggregate3Call;

/// Multicall manager for batch contract calls
#[derive(Debug, Clone, Copy)]
pub struct MulticallManager {
    /// Multicall3 contract address
    address: Address,
}

impl MulticallManager {
    /// Create a manager targeting a Multicall3 deployment at `address`
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Execute `calls` in a single `eth_call` and decode every result
    ///
    /// # Arguments
    /// * `provider` - Provider connected to the target chain
    /// * `calls` - Calls in execution order
    /// * `allow_failure` - Whether individual calls may fail
    ///
    /// # Returns
    /// * `Ok(Vec<CallOutcome>)` - One outcome per call, in order. Contains
    ///   `Failure` entries only when `allow_failure` is set
    /// * `Err(FetchError)` - Transport failure, or any call failure when
    ///   `allow_failure` is false
    pub async fn batch_call<N, P>(
        &self,
        provider: &P,
        calls: &[ContractCall],
        allow_failure: bool,
    ) -> Result<Vec<CallOutcome>, FetchError>
    where
        N: Network,
        P: Provider<N>,
    {
        if calls.is_empty() {
            return Ok(Vec::new());
        }

        let tx = N::TransactionRequest::default()
            .with_to(self.address)
            .with_input(encode_aggregate3(calls, allow_failure));
        let output = provider
            .call(tx)
            .await
            .map_err(|e| MulticallError::Transport(e.to_string()))?;

        let results = decode_aggregate3(&output)?;
        collect_outcomes(calls, results, allow_failure)
    }
}

impl Default for MulticallManager {
    fn default() -> Self {
        Self::new(MULTICALL3_ADDRESS)
    }
}

/// Encode `aggregate3` calldata for `calls`
pub fn encode_aggregate3(calls: &[ContractCall], allow_failure: bool) -> Bytes {
    let calls = calls
        .iter()
        .map(|call| Call3 {
            target: call.address,
            allowFailure: allow_failure,
            callData: encode_call(call),
        })
        .collect();
    aggregate3Call { calls }.abi_encode().into()
}

/// Decode `aggregate3` return data
pub fn decode_aggregate3(output: &[u8]) -> Result<Vec<Call3Result>, MulticallError> {
    aggregate3Call::abi_decode_returns(output).map_err(|e| MulticallError::Decode(e.to_string()))
}

/// Map raw Multicall3 results onto their calls
///
/// Reverted calls and undecodable return data become `CallOutcome::Failure`
/// when `allow_failure` is set and fail the whole batch otherwise.
pub fn collect_outcomes(
    calls: &[ContractCall],
    results: Vec<Call3Result>,
    allow_failure: bool,
) -> Result<Vec<CallOutcome>, FetchError> {
    if results.len() != calls.len() {
        return Err(MulticallError::LengthMismatch {
            expected: calls.len(),
            actual: results.len(),
        }
        .into());
    }

    calls
        .iter()
        .zip(results)
        .map(|(call, result)| {
            if !result.success {
                let reason = decode_revert_reason(&result.returnData)
                    .unwrap_or_else(|| "execution reverted".to_string());
                if allow_failure {
                    return Ok(CallOutcome::Failure(reason));
                }
                return Err(MulticallError::CallReverted {
                    target: call.address.to_string(),
                    function: call.function_name().to_string(),
                    reason,
                }
                .into());
            }

            match decode_call_return(call, &result.returnData) {
                Ok(value) => Ok(CallOutcome::Success(value)),
                Err(e) if allow_failure => Ok(CallOutcome::Failure(e.to_string())),
                Err(e) => Err(e.into()),
            }
        })
        .collect()
}
