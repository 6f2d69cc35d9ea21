//! Raw on-chain liquidity values, before decimal normalization.

use num_bigint::BigUint;

/// Raw balance of one side of a liquidity pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReserve {
    pub amount_raw: BigUint,
    pub decimals: u8,
}

impl TokenReserve {
    pub fn new(amount_raw: BigUint, decimals: u8) -> Self {
        Self {
            amount_raw,
            decimals,
        }
    }
}

/// One liquidity pool's state, read at a single block.
///
/// `reserve0` is the token being priced (base) and `reserve1` the asset it is
/// priced in (quote). `total_supply_raw` is the base token's supply and shares
/// `reserve0.decimals`.
///
/// Nothing here checks that the three values come from the same block; the
/// caller that reads them is responsible for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSnapshot {
    pub reserve0: TokenReserve,
    pub reserve1: TokenReserve,
    pub total_supply_raw: BigUint,
}

impl PairSnapshot {
    pub fn new(reserve0: TokenReserve, reserve1: TokenReserve, total_supply_raw: BigUint) -> Self {
        Self {
            reserve0,
            reserve1,
            total_supply_raw,
        }
    }
}

/// Output of a pair's `getReserves()`, in the pair's own token0/token1 order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reserves {
    pub reserve0: BigUint,
    pub reserve1: BigUint,
    pub block_timestamp_last: u32,
}
