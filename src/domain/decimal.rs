//! Lossless decimal numeric type backed by bigdecimal.
//!
//! Provides canonical parsing from strings and formatting without exponent notation.
//! On-chain integers routinely exceed 96 bits, so the backing type is unbounded.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Arbitrary-precision decimal for on-chain amounts, prices and market caps.
///
/// Serializes to a JSON string so no precision is lost to `f64` on the way out.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(BigDecimal);

impl Decimal {
    /// Build `digits * 10^-scale` exactly.
    pub fn from_scaled(digits: &BigUint, scale: i64) -> Self {
        Decimal(BigDecimal::new(BigInt::from(digits.clone()), scale))
    }

    /// Parse a Decimal from a string losslessly.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, bigdecimal::ParseBigDecimalError> {
        BigDecimal::from_str(s).map(Decimal)
    }

    /// Format the Decimal as a canonical string (no exponent notation, no trailing zeros).
    pub fn to_canonical_string(&self) -> String {
        self.0.normalized().to_plain_string()
    }

    /// The additive identity (0).
    pub fn zero() -> Self {
        Decimal(BigDecimal::zero())
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Decimal {
    type Err = bigdecimal::ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl From<BigUint> for Decimal {
    fn from(value: BigUint) -> Self {
        Decimal(BigDecimal::from(BigInt::from(value)))
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal(BigDecimal::from(value))
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Decimal::from_str_canonical(&s).map_err(serde::de::Error::custom)
    }
}

// Arithmetic operations
impl<'a> std::ops::Mul<&'a Decimal> for &'a Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &'a Decimal) -> Decimal {
        Decimal(&self.0 * &rhs.0)
    }
}

/// Division rounds non-terminating quotients to bigdecimal's default precision
/// (100 significant digits). Panics on a zero divisor, callers must check first.
impl<'a> std::ops::Div<&'a Decimal> for &'a Decimal {
    type Output = Decimal;

    fn div(self, rhs: &'a Decimal) -> Decimal {
        Decimal(&self.0 / &rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_parse_roundtrip() {
        let test_cases = vec![
            "123.456",
            "0.0001",
            "1000000",
            "-123.456",
            "0",
            "999999999999999999999999999999999999.999999999999999999",
        ];

        for s in test_cases {
            let decimal = Decimal::from_str_canonical(s).expect("parse failed");
            let formatted = decimal.to_canonical_string();
            let reparsed = Decimal::from_str_canonical(&formatted).expect("reparse failed");
            assert_eq!(decimal, reparsed, "roundtrip failed for {}", s);
        }
    }

    #[test]
    fn test_decimal_canonical_no_exponent() {
        let big = Decimal::from_str_canonical("1e30").unwrap();
        assert_eq!(big.to_canonical_string(), format!("1{}", "0".repeat(30)));

        let tiny = Decimal::from_scaled(&BigUint::from(1u8), 40);
        let formatted = tiny.to_canonical_string();
        assert!(!formatted.contains('e'), "got {}", formatted);
        assert_eq!(formatted, format!("0.{}1", "0".repeat(39)));
    }

    #[test]
    fn test_decimal_trailing_zeros_stripped() {
        let d = Decimal::from_str_canonical("2000.000000").unwrap();
        assert_eq!(d.to_canonical_string(), "2000");
    }

    #[test]
    fn test_from_scaled_is_exact() {
        let raw = BigUint::from(123456789u64);
        let d = Decimal::from_scaled(&raw, 4);
        assert_eq!(d.to_canonical_string(), "12345.6789");
    }

    #[test]
    fn test_decimal_arithmetic() {
        let a = Decimal::from_str_canonical("10.5").unwrap();
        let b = Decimal::from_str_canonical("2.5").unwrap();

        assert_eq!((&a * &b).to_canonical_string(), "26.25");
        assert_eq!((&a / &b).to_canonical_string(), "4.2");
    }

    #[test]
    fn test_non_terminating_division_is_bounded() {
        let one = Decimal::from(1u64);
        let three = Decimal::from(3u64);
        let third = &one / &three;
        assert!(third.to_canonical_string().starts_with("0.3333"));
        assert!(third.to_canonical_string().len() < 110);
    }

    #[test]
    fn test_decimal_json_serialization() {
        let decimal = Decimal::from_str_canonical("123.456").unwrap();
        let json = serde_json::to_value(&decimal).unwrap();
        assert!(json.is_string());
        assert_eq!(json, serde_json::json!("123.456"));

        let back: Decimal = serde_json::from_value(json).unwrap();
        assert_eq!(back, decimal);
    }

    #[test]
    fn test_decimal_sign_checks() {
        assert!(Decimal::zero().is_zero());
        assert!(!Decimal::zero().is_negative());
        assert!(Decimal::from_str_canonical("-0.1").unwrap().is_negative());
    }

    #[test]
    fn test_decimal_ordering_ignores_scale() {
        let a = Decimal::from_str_canonical("10").unwrap();
        let b = Decimal::from_str_canonical("10.00").unwrap();
        let c = Decimal::from_str_canonical("20").unwrap();
        assert_eq!(a, b);
        assert!(a < c);
    }
}
