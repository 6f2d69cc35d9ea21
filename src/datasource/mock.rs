//! Mock chain source for testing without network calls.

use super::{ChainSource, ChainSourceError};
use crate::domain::{Address, BlockTag, Reserves};
use async_trait::async_trait;
use num_bigint::BigUint;
use std::collections::HashMap;

/// ERC-20 state served by [`MockChainSource`].
#[derive(Debug, Clone)]
pub struct MockToken {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: BigUint,
    /// Whether a `mint()` simulation succeeds.
    pub mintable: bool,
}

impl MockToken {
    pub fn new(name: &str, symbol: &str, decimals: u8, total_supply: BigUint) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            total_supply,
            mintable: false,
        }
    }

    pub fn mintable(mut self) -> Self {
        self.mintable = true;
        self
    }
}

#[derive(Debug, Clone)]
struct MockPair {
    token0: Address,
    token1: Address,
    reserves: Reserves,
    lp_total_supply: BigUint,
}

/// Mock chain source that serves predefined contract state.
///
/// State is the same at every height, but reads pinned to a block other than
/// the configured head fail, which lets tests catch unpinned or mis-pinned reads.
#[derive(Debug, Clone)]
pub struct MockChainSource {
    block_number: u64,
    pairs: HashMap<Address, MockPair>,
    tokens: HashMap<Address, MockToken>,
    unavailable: bool,
}

impl MockChainSource {
    /// Create a new mock chain source with no contracts, at block 1.
    pub fn new() -> Self {
        Self {
            block_number: 1,
            pairs: HashMap::new(),
            tokens: HashMap::new(),
            unavailable: false,
        }
    }

    /// Set the head block number.
    pub fn with_block_number(mut self, block_number: u64) -> Self {
        self.block_number = block_number;
        self
    }

    /// Register a pair. `getPair` resolves it for either token order.
    pub fn with_pair(
        mut self,
        pair: Address,
        token0: Address,
        token1: Address,
        reserves: Reserves,
        lp_total_supply: BigUint,
    ) -> Self {
        self.pairs.insert(
            pair,
            MockPair {
                token0,
                token1,
                reserves,
                lp_total_supply,
            },
        );
        self
    }

    /// Register an ERC-20 token.
    pub fn with_token(mut self, address: Address, token: MockToken) -> Self {
        self.tokens.insert(address, token);
        self
    }

    /// Make every call fail with a network error.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    fn check(&self, block: BlockTag) -> Result<(), ChainSourceError> {
        if self.unavailable {
            return Err(ChainSourceError::NetworkError(
                "mock endpoint unavailable".to_string(),
            ));
        }
        match block {
            BlockTag::Number(n) if n != self.block_number => Err(ChainSourceError::Other(format!(
                "mock has no state at block {} (head is {})",
                n, self.block_number
            ))),
            _ => Ok(()),
        }
    }

    fn pair(&self, pair: Address) -> Result<&MockPair, ChainSourceError> {
        self.pairs
            .get(&pair)
            .ok_or_else(|| ChainSourceError::Other(format!("unknown pair {}", pair)))
    }

    fn token(&self, token: Address) -> Result<&MockToken, ChainSourceError> {
        self.tokens
            .get(&token)
            .ok_or_else(|| ChainSourceError::Other(format!("unknown token {}", token)))
    }
}

impl Default for MockChainSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainSource for MockChainSource {
    async fn block_number(&self) -> Result<u64, ChainSourceError> {
        self.check(BlockTag::Latest)?;
        Ok(self.block_number)
    }

    async fn get_pair(
        &self,
        _factory: Address,
        token_a: Address,
        token_b: Address,
        block: BlockTag,
    ) -> Result<Address, ChainSourceError> {
        self.check(block)?;
        Ok(self
            .pairs
            .iter()
            .find(|(_, p)| {
                (p.token0 == token_a && p.token1 == token_b)
                    || (p.token0 == token_b && p.token1 == token_a)
            })
            .map(|(address, _)| *address)
            .unwrap_or(Address::ZERO))
    }

    async fn pair_tokens(
        &self,
        pair: Address,
        block: BlockTag,
    ) -> Result<(Address, Address), ChainSourceError> {
        self.check(block)?;
        let p = self.pair(pair)?;
        Ok((p.token0, p.token1))
    }

    async fn get_reserves(
        &self,
        pair: Address,
        block: BlockTag,
    ) -> Result<Reserves, ChainSourceError> {
        self.check(block)?;
        Ok(self.pair(pair)?.reserves.clone())
    }

    async fn total_supply(
        &self,
        token: Address,
        block: BlockTag,
    ) -> Result<BigUint, ChainSourceError> {
        self.check(block)?;
        if let Some(p) = self.pairs.get(&token) {
            return Ok(p.lp_total_supply.clone());
        }
        Ok(self.token(token)?.total_supply.clone())
    }

    async fn decimals(&self, token: Address, block: BlockTag) -> Result<u8, ChainSourceError> {
        self.check(block)?;
        Ok(self.token(token)?.decimals)
    }

    async fn name(&self, token: Address, block: BlockTag) -> Result<String, ChainSourceError> {
        self.check(block)?;
        Ok(self.token(token)?.name.clone())
    }

    async fn symbol(&self, token: Address, block: BlockTag) -> Result<String, ChainSourceError> {
        self.check(block)?;
        Ok(self.token(token)?.symbol.clone())
    }

    async fn probe_mint(&self, token: Address, block: BlockTag) -> Result<(), ChainSourceError> {
        self.check(block)?;
        if self.token(token)?.mintable {
            Ok(())
        } else {
            Err(ChainSourceError::Reverted("execution reverted".to_string()))
        }
    }
}
