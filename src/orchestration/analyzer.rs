use super::report::{PairInfo, TokenReport};
use crate::datasource::{ChainSource, ChainSourceError};
use crate::domain::{Address, BlockTag, PairSnapshot, QuoteAsset, TokenMetadata, TokenReserve};
use crate::engine::{analyze_pair, classify_mint_probe};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Builds a [`TokenReport`] for one token from chain reads pinned to a single block.
#[derive(Debug, Clone)]
pub struct TokenAnalyzer {
    source: Arc<dyn ChainSource>,
    factory: Address,
    quote_assets: Vec<QuoteAsset>,
}

impl TokenAnalyzer {
    /// `quote_assets` are tried in order during pair discovery.
    pub fn new(
        source: Arc<dyn ChainSource>,
        factory: Address,
        quote_assets: Vec<QuoteAsset>,
    ) -> Self {
        Self {
            source,
            factory,
            quote_assets,
        }
    }

    /// Analyze `token` at the current head block.
    ///
    /// Upstream failures abort the run. Pricing failures do not: the report is
    /// returned with `pricing: None` and the reason in `pricing_error`.
    pub async fn analyze(&self, token: Address) -> Result<TokenReport, AnalysisError> {
        let block_number = self.source.block_number().await?;
        let block = BlockTag::Number(block_number);
        info!("Analyzing token {} at block {}", token, block_number);

        let (pair, quote) = self.find_pair(token, block).await?;
        info!("Using {} pair {} for token {}", quote.symbol, pair, token);

        let (pair_tokens, reserves, lp_total_supply) = futures::try_join!(
            self.source.pair_tokens(pair, block),
            self.source.get_reserves(pair, block),
            self.source.total_supply(pair, block),
        )?;
        let token_is_token0 = orient(token, &quote, pair, pair_tokens)?;
        let (base_raw, quote_raw) = if token_is_token0 {
            (reserves.reserve0, reserves.reserve1)
        } else {
            (reserves.reserve1, reserves.reserve0)
        };

        let quote_decimals = async {
            match quote.decimals {
                Some(decimals) => Ok::<u8, ChainSourceError>(decimals),
                None => self.source.decimals(quote.address, block).await,
            }
        };
        let (name, symbol, decimals, total_supply, quote_decimals) = futures::try_join!(
            self.source.name(token, block),
            self.source.symbol(token, block),
            self.source.decimals(token, block),
            self.source.total_supply(token, block),
            quote_decimals,
        )?;

        let snapshot = PairSnapshot::new(
            TokenReserve::new(base_raw.clone(), decimals),
            TokenReserve::new(quote_raw.clone(), quote_decimals),
            total_supply.clone(),
        );
        let (pricing, pricing_error) = match analyze_pair(&snapshot) {
            Ok(result) => {
                debug!(
                    "Token {} priced at {} {} (market cap {})",
                    symbol, result.price_per_token, quote.symbol, result.market_cap
                );
                (Some(result), None)
            }
            Err(e) => {
                warn!("Price undefined for token {}: {}", token, e);
                (None, Some(e.to_string()))
            }
        };

        let probe = self.source.probe_mint(token, block).await;
        if let Err(e) = &probe {
            if !matches!(e, ChainSourceError::Reverted(_)) {
                warn!(
                    "mint() probe on {} failed without a revert ({}); reporting supply as fixed",
                    token, e
                );
            }
        }
        let mint = classify_mint_probe(&probe);

        Ok(TokenReport {
            generated_at: chrono::Utc::now(),
            block_number,
            token: TokenMetadata {
                address: token,
                name,
                symbol,
                decimals,
            },
            total_supply_raw: total_supply.to_string(),
            pair: PairInfo {
                address: pair,
                quote: QuoteAsset {
                    decimals: Some(quote_decimals),
                    ..quote
                },
                token_is_token0,
                base_reserve_raw: base_raw.to_string(),
                quote_reserve_raw: quote_raw.to_string(),
                lp_total_supply_raw: lp_total_supply.to_string(),
                block_timestamp_last: reserves.block_timestamp_last,
            },
            pricing,
            pricing_error,
            mint,
        })
    }

    /// First quote asset with a non-zero pair for `token`.
    async fn find_pair(
        &self,
        token: Address,
        block: BlockTag,
    ) -> Result<(Address, QuoteAsset), AnalysisError> {
        for quote in &self.quote_assets {
            if quote.address == token {
                continue;
            }
            let pair = self
                .source
                .get_pair(self.factory, token, quote.address, block)
                .await?;
            if pair != Address::ZERO {
                return Ok((pair, quote.clone()));
            }
            debug!("No {} pair for token {}", quote.symbol, token);
        }
        Err(AnalysisError::PairNotFound { token })
    }
}

/// Returns whether `token` is the pair's token0, checking the pair really is token/quote.
fn orient(
    token: Address,
    quote: &QuoteAsset,
    pair: Address,
    (token0, token1): (Address, Address),
) -> Result<bool, AnalysisError> {
    let mismatch = || AnalysisError::PairMismatch {
        pair,
        token,
        quote: quote.address,
        token0,
        token1,
    };

    let token_is_token0 = if token1 == quote.address {
        true
    } else if token0 == quote.address {
        false
    } else {
        return Err(mismatch());
    };

    let base = if token_is_token0 { token0 } else { token1 };
    if base != token {
        return Err(mismatch());
    }
    Ok(token_is_token0)
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] ChainSourceError),
    #[error("No pair found for token {token} against any quote asset")]
    PairNotFound { token: Address },
    #[error("Pair {pair} holds {token0}/{token1}, expected {token} against {quote}")]
    PairMismatch {
        pair: Address,
        token: Address,
        quote: Address,
        token0: Address,
        token1: Address,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn usdc() -> QuoteAsset {
        QuoteAsset::new("USDC", addr(0xcc), Some(6))
    }

    #[test]
    fn test_orient_token_is_token0() {
        assert!(orient(addr(0x01), &usdc(), addr(0xaa), (addr(0x01), addr(0xcc))).unwrap());
    }

    #[test]
    fn test_orient_token_is_token1() {
        assert!(!orient(addr(0x01), &usdc(), addr(0xaa), (addr(0xcc), addr(0x01))).unwrap());
    }

    #[test]
    fn test_orient_quote_missing() {
        let result = orient(addr(0x01), &usdc(), addr(0xaa), (addr(0x01), addr(0x02)));
        assert!(matches!(result, Err(AnalysisError::PairMismatch { .. })));
    }

    #[test]
    fn test_orient_base_is_other_token() {
        let result = orient(addr(0x01), &usdc(), addr(0xaa), (addr(0x03), addr(0xcc)));
        assert!(matches!(result, Err(AnalysisError::PairMismatch { .. })));
    }
}
