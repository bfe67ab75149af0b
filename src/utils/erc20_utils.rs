//! ERC20 call encoding and return-data decoding
//!
//! Builds the `balanceOf` / `decimals` / `symbol` call batch for a set of
//! tokens and decodes each call's raw return data into a [`CallValue`].

use alloy::{
    dyn_abi::{DynSolType, DynSolValue},
    primitives::{Address, Bytes},
    sol,
    sol_types::SolCall,
};
use log::warn;
use crate::{
    errors::TokenError,
    types::{CallValue, ContractCall, Erc20Function, SymbolValue},
};

// ERC20 read-only interface
//
// Generates Rust bindings for:
// - balanceOf(address): Returns token balance for an address
// - decimals(): Returns token decimal places
// - symbol(): Returns token symbol
sol! {
    function balanceOf(address owner) public returns (uint256);
    function decimals() public returns (uint8);
    function symbol() public returns (string);
}

/// Number of calls emitted per token
pub const CALLS_PER_TOKEN: usize = 3;

/// Build the read calls for `owner`'s balances of `tokens`
///
/// Emits `balanceOf(owner)`, `decimals()`, `symbol()` for each token, in that
/// order, preserving token order. Decoders rely on this fixed stride.
///
/// # Example
/// ```
/// use alloy::primitives::address;
/// use evm_balances::utils::erc20_utils::{build_balance_calls, CALLS_PER_TOKEN};
///
/// let owner = address!("28C6c06298d514Db089934071355E5743bf21d60");
/// let usdc = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
/// let calls = build_balance_calls(owner, &[usdc]);
/// assert_eq!(calls.len(), CALLS_PER_TOKEN);
/// assert_eq!(calls[0].function_name(), "balanceOf");
/// ```
pub fn build_balance_calls(owner: Address, tokens: &[Address]) -> Vec<ContractCall> {
    tokens
        .iter()
        .flat_map(|&token| {
            [
                Erc20Function::BalanceOf(owner),
                Erc20Function::Decimals,
                Erc20Function::Symbol,
            ]
            .map(|function| ContractCall::new(token, function))
        })
        .collect()
}

/// ABI-encoded calldata for a call
pub fn encode_call(call: &ContractCall) -> Bytes {
    match call.function {
        Erc20Function::BalanceOf(owner) => balanceOfCall { owner }.abi_encode().into(),
        Erc20Function::Decimals => decimalsCall {}.abi_encode().into(),
        Erc20Function::Symbol => symbolCall {}.abi_encode().into(),
    }
}

/// Decode the return data of `call`
///
/// # Returns
/// - `Ok(CallValue)`: Value matching the called function
/// - `Err(TokenError)`: If the data does not match the function's return type
pub fn decode_call_return(call: &ContractCall, data: &[u8]) -> Result<CallValue, TokenError> {
    match call.function {
        Erc20Function::BalanceOf(_) => balanceOfCall::abi_decode_returns(data)
            .map(CallValue::Balance)
            .map_err(|e| TokenError::BalanceDecode {
                address: call.address.to_string(),
                reason: e.to_string(),
            }),
        Erc20Function::Decimals => decimalsCall::abi_decode_returns(data)
            .map(CallValue::Decimals)
            .map_err(|e| TokenError::DecimalsDecode {
                address: call.address.to_string(),
                reason: e.to_string(),
            }),
        Erc20Function::Symbol => decode_symbol(call.address, data).map(CallValue::Symbol),
    }
}

/// Decode `symbol()` return data
///
/// Tries a dynamic `string` first. Tokens that declare `symbol()` as
/// `bytes32` fail that decode and are read as a fixed 32-byte word instead.
pub fn decode_symbol(token: Address, data: &[u8]) -> Result<SymbolValue, TokenError> {
    let string_err = match DynSolType::String.abi_decode(data) {
        Ok(DynSolValue::String(symbol)) => return Ok(SymbolValue::Text(symbol)),
        Ok(other) => format!("unexpected value {other:?}"),
        Err(e) => e.to_string(),
    };
    warn!("symbol() of {token} is not a string ({string_err}), decoding as bytes32");

    match DynSolType::FixedBytes(32).abi_decode(data) {
        Ok(DynSolValue::FixedBytes(word, 32)) => Ok(SymbolValue::Bytes32(word)),
        Ok(other) => Err(TokenError::SymbolDecode {
            address: token.to_string(),
            reason: format!("unexpected value {other:?}"),
        }),
        Err(e) => Err(TokenError::SymbolDecode {
            address: token.to_string(),
            reason: format!("not a string ({string_err}) nor bytes32 ({e})"),
        }),
    }
}
