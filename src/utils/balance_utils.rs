//! Balance formatting and native currency records
//!
//! Provides unit formatting shared by both balance shapes and the assembly of
//! the native currency record with its ETH-like fallbacks.

use alloy::primitives::U256;
use crate::types::{NativeBalance, NativeCurrency};

/// Decimals assumed when a chain's native currency is unknown
pub const DEFAULT_NATIVE_DECIMALS: u8 = 18;

/// Symbol assumed when a chain's native currency is unknown
pub const DEFAULT_NATIVE_SYMBOL: &str = "ETH";

/// Render `value` scaled by `decimals` as a decimal string
///
/// Trailing fractional zeros are trimmed down to a single digit, so one ether
/// renders as `"1.0"` and 1.5 USDC as `"1.5"`. Zero decimals render the raw
/// integer. Every `u8` precision is accepted, including values above the 77
/// digits a `U256` can hold.
///
/// # Example
/// ```
/// use alloy::primitives::U256;
/// use evm_balances::utils::balance_utils::format_balance;
///
/// let one_ether = U256::from(10u64).pow(U256::from(18));
/// assert_eq!(format_balance(one_ether, 18), "1.0");
/// assert_eq!(format_balance(U256::from(1_500_000u64), 6), "1.5");
/// ```
pub fn format_balance(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    if decimals == 0 {
        return digits;
    }

    let scale = usize::from(decimals);
    let padded = format!("{digits:0>width$}", width = scale + 1);
    let (integer, fraction) = padded.split_at(padded.len() - scale);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{integer}.0")
    } else {
        format!("{integer}.{fraction}")
    }
}

/// Build the native balance record for a chain
///
/// # Arguments
/// - `value`: Balance in wei
/// - `currency`: Native currency metadata, `None` if the chain is unknown
///
/// Unknown chains use 18 decimals and the `ETH` symbol, and carry no currency
/// name.
pub fn native_balance(value: U256, currency: Option<&NativeCurrency>) -> NativeBalance {
    let decimals = currency.map_or(DEFAULT_NATIVE_DECIMALS, |c| c.decimals);
    NativeBalance {
        currency_name: currency.map(|c| c.name.clone()),
        value,
        decimals,
        symbol: currency.map_or_else(|| DEFAULT_NATIVE_SYMBOL.to_string(), |c| c.symbol.clone()),
        formatted: format_balance(value, decimals),
    }
}
