//! Pure computation engine(s): pair pricing and the mint heuristic.

pub mod mint;
pub mod pricing;

pub use mint::{classify_mint_probe, MintHeuristic};
pub use pricing::{
    analyze_pair, compute_market_cap, compute_price, normalize, PricingError, PricingResult,
    MAX_DECIMALS,
};
