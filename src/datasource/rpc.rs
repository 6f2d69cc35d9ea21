//! JSON-RPC chain source over HTTP.

use super::abi::{
    decode_reserves, decode_string_or_bytes32, from_hex_data, parse_quantity, to_hex_data,
    u256_to_biguint, IERC20Metadata, IMintable, IUniswapV2Factory, IUniswapV2Pair,
};
use super::{ChainSource, ChainSourceError};
use crate::domain::{Address, BlockTag, Reserves};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use num_bigint::BigUint;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// JSON-RPC error code geth and most providers use for reverts.
const REVERT_ERROR_CODE: i64 = 3;

/// Chain source backed by an Ethereum JSON-RPC endpoint (`eth_call`, `eth_blockNumber`).
#[derive(Debug, Clone)]
pub struct JsonRpcChainSource {
    client: Client,
    rpc_url: String,
}

impl JsonRpcChainSource {
    /// Create a new chain source for `rpc_url`.
    pub fn new(rpc_url: String) -> Self {
        Self {
            client: Client::new(),
            rpc_url,
        }
    }

    async fn post_rpc(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ChainSourceError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        let body = retry(backoff, || async {
            let response = self
                .client
                .post(&self.rpc_url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| {
                    backoff::Error::transient(ChainSourceError::NetworkError(e.to_string()))
                })?;

            let status = response.status();
            if status == 429 {
                return Err(backoff::Error::transient(ChainSourceError::RateLimited));
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(ChainSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(ChainSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            response.json::<serde_json::Value>().await.map_err(|e| {
                backoff::Error::permanent(ChainSourceError::ParseError(e.to_string()))
            })
        })
        .await?;

        extract_result(body)
    }

    async fn eth_call(
        &self,
        to: Address,
        data: Vec<u8>,
        block: BlockTag,
    ) -> Result<Vec<u8>, ChainSourceError> {
        let params = serde_json::json!([
            { "to": to.to_string(), "data": to_hex_data(&data) },
            block.to_rpc_param(),
        ]);
        let result = self.post_rpc("eth_call", params).await?;
        let hex = result
            .as_str()
            .ok_or_else(|| ChainSourceError::ParseError("Expected hex string result".to_string()))?;
        from_hex_data(hex)
    }

    async fn call<C: SolCall>(
        &self,
        to: Address,
        call: C,
        block: BlockTag,
    ) -> Result<C::Return, ChainSourceError> {
        let data = self.eth_call(to, call.abi_encode(), block).await?;
        Ok(C::abi_decode_returns(&data)?)
    }
}

/// Pull `result` out of a JSON-RPC response, mapping `error` objects.
fn extract_result(body: serde_json::Value) -> Result<serde_json::Value, ChainSourceError> {
    if let Some(err) = body.get("error") {
        let code = err.get("code").and_then(|v| v.as_i64()).unwrap_or_default();
        let message = err
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
            .to_string();
        if code == REVERT_ERROR_CODE || message.to_lowercase().contains("revert") {
            return Err(ChainSourceError::Reverted(message));
        }
        return Err(ChainSourceError::RpcError { code, message });
    }

    match body.get("result") {
        Some(result) if !result.is_null() => Ok(result.clone()),
        _ => Err(ChainSourceError::ParseError(
            "Response has neither result nor error".to_string(),
        )),
    }
}

#[async_trait]
impl ChainSource for JsonRpcChainSource {
    async fn block_number(&self) -> Result<u64, ChainSourceError> {
        let result = self
            .post_rpc("eth_blockNumber", serde_json::json!([]))
            .await?;
        let hex = result
            .as_str()
            .ok_or_else(|| ChainSourceError::ParseError("Expected hex quantity".to_string()))?;
        parse_quantity(hex)
    }

    async fn get_pair(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        block: BlockTag,
    ) -> Result<Address, ChainSourceError> {
        debug!(
            "getPair factory={}, token_a={}, token_b={}, block={}",
            factory, token_a, token_b, block
        );
        let call = IUniswapV2Factory::getPairCall {
            tokenA: token_a,
            tokenB: token_b,
        };
        self.call(factory, call, block).await
    }

    async fn pair_tokens(
        &self,
        pair: Address,
        block: BlockTag,
    ) -> Result<(Address, Address), ChainSourceError> {
        let token0 = self
            .call(pair, IUniswapV2Pair::token0Call {}, block)
            .await?;
        let token1 = self
            .call(pair, IUniswapV2Pair::token1Call {}, block)
            .await?;
        Ok((token0, token1))
    }

    async fn get_reserves(
        &self,
        pair: Address,
        block: BlockTag,
    ) -> Result<Reserves, ChainSourceError> {
        debug!("getReserves pair={}, block={}", pair, block);
        let data = self
            .eth_call(pair, IUniswapV2Pair::getReservesCall {}.abi_encode(), block)
            .await?;
        decode_reserves(&data)
    }

    async fn total_supply(
        &self,
        token: Address,
        block: BlockTag,
    ) -> Result<BigUint, ChainSourceError> {
        let supply = self
            .call(token, IERC20Metadata::totalSupplyCall {}, block)
            .await?;
        Ok(u256_to_biguint(supply))
    }

    async fn decimals(&self, token: Address, block: BlockTag) -> Result<u8, ChainSourceError> {
        self.call(token, IERC20Metadata::decimalsCall {}, block)
            .await
    }

    async fn name(&self, token: Address, block: BlockTag) -> Result<String, ChainSourceError> {
        let data = self
            .eth_call(token, IERC20Metadata::nameCall {}.abi_encode(), block)
            .await?;
        decode_string_or_bytes32(&data)
    }

    async fn symbol(&self, token: Address, block: BlockTag) -> Result<String, ChainSourceError> {
        let data = self
            .eth_call(token, IERC20Metadata::symbolCall {}.abi_encode(), block)
            .await?;
        decode_string_or_bytes32(&data)
    }

    async fn probe_mint(&self, token: Address, block: BlockTag) -> Result<(), ChainSourceError> {
        debug!("Probing mint() on token={}, block={}", token, block);
        self.eth_call(token, IMintable::mintCall {}.abi_encode(), block)
            .await
            .map(|_| ())
    }
}
