//! Contract interfaces and ABI helpers for the calls the report makes.

use super::ChainSourceError;
use crate::domain::Reserves;
use alloy_primitives::U256;
use alloy_sol_types::{sol, SolCall};
use num_bigint::BigUint;

sol! {
    interface IUniswapV2Factory {
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }

    interface IUniswapV2Pair {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
    }

    interface IERC20Metadata {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
    }

    interface IMintable {
        function mint() external;
    }
}

pub fn u256_to_biguint(value: U256) -> BigUint {
    BigUint::from_bytes_be(&value.to_be_bytes_vec())
}

/// Decode `getReserves()` return data.
pub fn decode_reserves(data: &[u8]) -> Result<Reserves, ChainSourceError> {
    let ret = IUniswapV2Pair::getReservesCall::abi_decode_returns(data)?;
    Ok(Reserves {
        reserve0: BigUint::from_bytes_be(&ret.reserve0.to_be_bytes_vec()),
        reserve1: BigUint::from_bytes_be(&ret.reserve1.to_be_bytes_vec()),
        block_timestamp_last: ret.blockTimestampLast,
    })
}

/// Decode a `name()`/`symbol()` result.
///
/// Some early tokens return `bytes32` instead of `string`; those are decoded as
/// NUL-padded UTF-8.
pub fn decode_string_or_bytes32(data: &[u8]) -> Result<String, ChainSourceError> {
    match IERC20Metadata::nameCall::abi_decode_returns(data) {
        Ok(s) => Ok(s),
        Err(_) if data.len() == 32 => {
            let end = data.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
            Ok(String::from_utf8_lossy(&data[..end]).into_owned())
        }
        Err(e) => Err(e.into()),
    }
}

/// `0x`-prefixed hex string for JSON-RPC.
pub fn to_hex_data(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Parse `0x`-prefixed hex returned by JSON-RPC.
pub fn from_hex_data(s: &str) -> Result<Vec<u8>, ChainSourceError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| ChainSourceError::ParseError(format!("Invalid hex data: {}", e)))
}

/// Parse a JSON-RPC hex quantity such as `"0x1b4"`.
pub fn parse_quantity(s: &str) -> Result<u64, ChainSourceError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| ChainSourceError::ParseError(format!("Quantity missing 0x prefix: {}", s)))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| ChainSourceError::ParseError(format!("Invalid quantity {}: {}", s, e)))
}
