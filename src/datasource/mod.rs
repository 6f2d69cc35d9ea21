//! Chain source abstraction for the read-only contract calls a token report needs.

use crate::domain::{Address, BlockTag, Reserves};
use async_trait::async_trait;
use num_bigint::BigUint;
use std::fmt;

pub mod abi;
pub mod mock;
pub mod rpc;

pub use mock::{MockChainSource, MockToken};
pub use rpc::JsonRpcChainSource;

/// Read-only access to a Uniswap V2 style factory, its pairs and ERC-20 tokens.
///
/// Every read takes the block it must execute at, so a caller can pin a whole
/// report to one height. Implementations must handle retry/backoff.
#[async_trait]
pub trait ChainSource: Send + Sync + fmt::Debug {
    /// Latest block height known to the node.
    async fn block_number(&self) -> Result<u64, ChainSourceError>;

    /// Pair address for `(token_a, token_b)`, `Address::ZERO` if none exists.
    async fn get_pair(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        block: BlockTag,
    ) -> Result<Address, ChainSourceError>;

    /// `(token0, token1)` of a pair, in the pair's own order.
    async fn pair_tokens(
        &self,
        pair: Address,
        block: BlockTag,
    ) -> Result<(Address, Address), ChainSourceError>;

    /// Raw reserves of a pair.
    async fn get_reserves(&self, pair: Address, block: BlockTag)
        -> Result<Reserves, ChainSourceError>;

    /// `totalSupply()` of any ERC-20, LP tokens included.
    async fn total_supply(
        &self,
        token: Address,
        block: BlockTag,
    ) -> Result<BigUint, ChainSourceError>;

    async fn decimals(&self, token: Address, block: BlockTag) -> Result<u8, ChainSourceError>;

    async fn name(&self, token: Address, block: BlockTag) -> Result<String, ChainSourceError>;

    async fn symbol(&self, token: Address, block: BlockTag) -> Result<String, ChainSourceError>;

    /// Simulate a zero-argument `mint()` on `token`.
    ///
    /// `Ok(())` means the simulation did not revert. See
    /// [`crate::engine::mint`] for how the outcome is interpreted.
    async fn probe_mint(&self, token: Address, block: BlockTag) -> Result<(), ChainSourceError>;
}

/// Error type for chain source operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainSourceError {
    /// Network error (e.g., connection timeout, DNS failure)
    NetworkError(String),
    /// HTTP error (e.g., 5xx server error)
    HttpError { status: u16, message: String },
    /// JSON-RPC level error returned by the node
    RpcError { code: i64, message: String },
    /// The contract call reverted
    Reverted(String),
    /// Parsing error (invalid JSON, malformed hex or ABI data)
    ParseError(String),
    /// Rate limit exceeded
    RateLimited,
    /// Other error
    Other(String),
}

impl fmt::Display for ChainSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ChainSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            ChainSourceError::RpcError { code, message } => {
                write!(f, "RPC error {}: {}", code, message)
            }
            ChainSourceError::Reverted(msg) => write!(f, "Execution reverted: {}", msg),
            ChainSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ChainSourceError::RateLimited => write!(f, "Rate limited"),
            ChainSourceError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for ChainSourceError {}

impl From<alloy_sol_types::Error> for ChainSourceError {
    fn from(err: alloy_sol_types::Error) -> Self {
        ChainSourceError::ParseError(format!("ABI decode failed: {}", err))
    }
}
