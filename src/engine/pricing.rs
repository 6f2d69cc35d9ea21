//! Decimal normalization and pair pricing.
//!
//! Everything here is pure: raw integers in, arbitrary-precision decimals out.
//! Normalization is exact (it only moves the decimal point); the single division
//! in [`compute_price`] rounds non-terminating quotients to 100 significant digits.

use crate::domain::{Decimal, PairSnapshot, TokenReserve};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest decimals value accepted. `10^78` already exceeds `2^256`.
pub const MAX_DECIMALS: i64 = 77;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("invalid decimals {0}: must be between 0 and {max}", max = MAX_DECIMALS)]
    InvalidDecimals(i64),
    #[error("base reserve is zero, price is undefined")]
    DivisionByZero,
}

/// Price and market cap of a base token in quote units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub price_per_token: Decimal,
    pub normalized_supply: Decimal,
    pub market_cap: Decimal,
}

/// `amount_raw / 10^decimals`, exactly.
pub fn normalize(amount_raw: &BigUint, decimals: i64) -> Result<Decimal, PricingError> {
    if !(0..=MAX_DECIMALS).contains(&decimals) {
        return Err(PricingError::InvalidDecimals(decimals));
    }
    Ok(Decimal::from_scaled(amount_raw, decimals))
}

/// Quote units per base unit: `normalize(reserve1) / normalize(reserve0)`.
pub fn compute_price(
    reserve0: &TokenReserve,
    reserve1: &TokenReserve,
) -> Result<Decimal, PricingError> {
    let base = normalize(&reserve0.amount_raw, i64::from(reserve0.decimals))?;
    let quote = normalize(&reserve1.amount_raw, i64::from(reserve1.decimals))?;

    if base.is_zero() {
        return Err(PricingError::DivisionByZero);
    }

    Ok(&quote / &base)
}

/// `normalize(total_supply_raw, supply_decimals) * price_per_token`.
pub fn compute_market_cap(
    total_supply_raw: &BigUint,
    supply_decimals: i64,
    price_per_token: &Decimal,
) -> Result<Decimal, PricingError> {
    let supply = normalize(total_supply_raw, supply_decimals)?;
    Ok(&supply * price_per_token)
}

/// Price the base side of `snapshot` and derive its market cap.
///
/// Returns either a complete result or the first error hit.
///
/// The market cap is derived from the already-rounded price, so when
/// `quote / base` does not terminate it inherits the 100-digit rounding:
/// 3 base against 1 quote with a supply of 3 gives `0.99..9` (100 nines), not `1`.
pub fn analyze_pair(snapshot: &PairSnapshot) -> Result<PricingResult, PricingError> {
    let supply_decimals = i64::from(snapshot.reserve0.decimals);

    let price_per_token = compute_price(&snapshot.reserve0, &snapshot.reserve1)?;
    let normalized_supply = normalize(&snapshot.total_supply_raw, supply_decimals)?;
    let market_cap =
        compute_market_cap(&snapshot.total_supply_raw, supply_decimals, &price_per_token)?;

    Ok(PricingResult {
        price_per_token,
        normalized_supply,
        market_cap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::pow;

    fn reserve(amount: u128, decimals: u8) -> TokenReserve {
        TokenReserve::new(BigUint::from(amount), decimals)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_normalize_zero_decimals_is_identity() {
        for raw in [0u64, 1, 7, 1_000_000, u64::MAX] {
            let value = normalize(&BigUint::from(raw), 0).unwrap();
            assert_eq!(value, Decimal::from(raw));
        }
    }

    #[test]
    fn test_normalize_shifts_decimal_point() {
        let value = normalize(&BigUint::from(1_500_000u64), 6).unwrap();
        assert_eq!(value.to_canonical_string(), "1.5");

        let value = normalize(&BigUint::from(1u64), 18).unwrap();
        assert_eq!(value.to_canonical_string(), "0.000000000000000001");
    }

    #[test]
    fn test_normalize_rejects_negative_decimals() {
        assert_eq!(
            normalize(&BigUint::from(1u8), -1),
            Err(PricingError::InvalidDecimals(-1))
        );
    }

    #[test]
    fn test_normalize_rejects_decimals_above_max() {
        assert!(normalize(&BigUint::from(1u8), MAX_DECIMALS).is_ok());
        assert_eq!(
            normalize(&BigUint::from(1u8), 78),
            Err(PricingError::InvalidDecimals(78))
        );
    }

    #[test]
    fn test_normalize_handles_uint256_max() {
        let max = (BigUint::from(1u8) << 256usize) - BigUint::from(1u8);
        let value = normalize(&max, 18).unwrap();
        let text = value.to_canonical_string();
        assert!(text.starts_with("115792089237316195423570985008687907853269984665640564039457"));
        assert!(text.ends_with(".584007913129639935"));
    }

    #[test]
    fn test_compute_price_scenario() {
        let usdc_side = reserve(1_000_000, 6);
        let eth_side = TokenReserve::new(
            BigUint::from(2000u32) * pow(BigUint::from(10u8), 18),
            18,
        );
        let price = compute_price(&usdc_side, &eth_side).unwrap();
        assert_eq!(price, dec("2000"));
    }

    #[test]
    fn test_compute_price_mixed_decimals() {
        // 1 base token (18 decimals) against 2 quote tokens (6 decimals)
        let base = TokenReserve::new(pow(BigUint::from(10u8), 18), 18);
        let quote = reserve(2_000_000, 6);
        assert_eq!(compute_price(&base, &quote).unwrap(), dec("2"));
    }

    #[test]
    fn test_compute_price_zero_base_reserve() {
        let result = compute_price(&reserve(0, 18), &reserve(5_000_000, 6));
        assert_eq!(result, Err(PricingError::DivisionByZero));
    }

    #[test]
    fn test_compute_price_zero_quote_reserve_is_zero_price() {
        let price = compute_price(&reserve(10, 0), &reserve(0, 6)).unwrap();
        assert!(price.is_zero());
    }

    #[test]
    fn test_compute_market_cap_scenario() {
        let cap = compute_market_cap(&BigUint::from(500_000u32), 6, &dec("2000")).unwrap();
        assert_eq!(cap, dec("1000"));
    }

    #[test]
    fn test_compute_market_cap_invalid_decimals() {
        let result = compute_market_cap(&BigUint::from(1u8), -3, &dec("1"));
        assert_eq!(result, Err(PricingError::InvalidDecimals(-3)));
    }

    #[test]
    fn test_analyze_pair_complete_result() {
        let snapshot = PairSnapshot::new(
            reserve(1_000_000, 6),
            TokenReserve::new(BigUint::from(2000u32) * pow(BigUint::from(10u8), 18), 18),
            BigUint::from(500_000u32),
        );
        let result = analyze_pair(&snapshot).unwrap();
        assert_eq!(result.price_per_token, dec("2000"));
        assert_eq!(result.normalized_supply, dec("0.5"));
        assert_eq!(result.market_cap, dec("1000"));
    }

    #[test]
    fn test_analyze_pair_drained_pool() {
        let snapshot = PairSnapshot::new(reserve(0, 6), reserve(1, 18), BigUint::from(1u8));
        assert_eq!(analyze_pair(&snapshot), Err(PricingError::DivisionByZero));
    }

    #[test]
    fn test_analyze_pair_invalid_reserve_decimals() {
        let snapshot = PairSnapshot::new(reserve(1, 200), reserve(1, 18), BigUint::from(1u8));
        assert_eq!(analyze_pair(&snapshot), Err(PricingError::InvalidDecimals(200)));
    }

    #[test]
    fn test_invalid_decimals_message_names_bound() {
        assert_eq!(
            PricingError::InvalidDecimals(78).to_string(),
            format!("invalid decimals 78: must be between 0 and {}", MAX_DECIMALS)
        );
    }

    #[test]
    fn test_analyze_pair_market_cap_uses_rounded_price() {
        let snapshot = PairSnapshot::new(reserve(3, 0), reserve(1, 0), BigUint::from(3u8));
        let result = analyze_pair(&snapshot).unwrap();
        assert_eq!(
            result.market_cap,
            &result.normalized_supply * &result.price_per_token
        );
        assert_eq!(
            result.market_cap.to_canonical_string(),
            format!("0.{}", "9".repeat(100))
        );
    }

    #[test]
    fn test_pricing_result_serializes_as_strings() {
        let result = PricingResult {
            price_per_token: dec("0.25"),
            normalized_supply: dec("1000000"),
            market_cap: dec("250000"),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["price_per_token"], "0.25");
        assert_eq!(json["market_cap"], "250000");
    }
}
